use parley_voice::{Credential, LiveKitConfig, TokenIssuer, VoiceError};
use std::collections::HashSet;

const DEFAULT_URL: &str = "wss://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "devsecret-devsecret-devsecret-00";

fn issuer() -> TokenIssuer {
    TokenIssuer::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET))
}

fn is_tag(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_alphanumeric())
}

#[test]
fn mint_produces_identity_and_token() {
    let credential = issuer().mint().expect("failed to mint credential");

    assert!(!credential.access_token.is_empty());
    let tag = credential
        .identity
        .strip_prefix("user-")
        .expect("identity should start with user-");
    assert!(is_tag(tag), "unexpected identity: {}", credential.identity);
}

#[test]
fn mint_room_names_follow_pattern() {
    let Credential { room_name, .. } = issuer().mint().unwrap();
    let parts: Vec<&str> = room_name.split('-').collect();
    assert_eq!(parts.len(), 3, "unexpected room name: {}", room_name);
    assert_eq!(parts[0], "parley");
    assert!(is_tag(parts[1]) && is_tag(parts[2]));
}

#[test]
fn repeated_mints_use_distinct_rooms() {
    let issuer = issuer();
    let rooms: HashSet<String> = (0..16)
        .map(|_| issuer.mint().unwrap().room_name)
        .collect();
    assert_eq!(rooms.len(), 16, "room names collided");
}

#[test]
fn mint_without_signing_keys_fails() {
    let issuer = TokenIssuer::new(LiveKitConfig::new(DEFAULT_URL, "", ""));
    match issuer.mint() {
        Err(VoiceError::Config(msg)) => assert!(!msg.is_empty()),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn token_carries_the_full_grant_set() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;

    let credential = issuer().mint().expect("failed to mint credential");

    #[derive(Deserialize)]
    struct Claims {
        sub: String,
        video: VideoClaims,
    }

    #[derive(Deserialize)]
    struct VideoClaims {
        room: String,
        #[serde(rename = "roomJoin")]
        room_join: bool,
        #[serde(rename = "canPublish")]
        can_publish: bool,
        #[serde(rename = "canPublishData")]
        can_publish_data: bool,
        #[serde(rename = "canSubscribe")]
        can_subscribe: bool,
        #[serde(rename = "canUpdateOwnMetadata")]
        can_update_own_metadata: bool,
    }

    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    let token_data = decode::<Claims>(&credential.access_token, &key, &validation)
        .expect("failed to decode token");

    assert_eq!(token_data.claims.sub, credential.identity);
    assert_eq!(token_data.claims.video.room, credential.room_name);
    assert!(token_data.claims.video.room_join, "roomJoin should be true");
    assert!(token_data.claims.video.can_publish, "canPublish should be true");
    assert!(
        token_data.claims.video.can_publish_data,
        "canPublishData should be true"
    );
    assert!(
        token_data.claims.video.can_subscribe,
        "canSubscribe should be true"
    );
    assert!(
        token_data.claims.video.can_update_own_metadata,
        "canUpdateOwnMetadata should be true"
    );
}
