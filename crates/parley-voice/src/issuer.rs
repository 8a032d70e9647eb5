use crate::config::LiveKitConfig;
use crate::error::VoiceError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::Duration;

/// Length of the random alphanumeric tags in room and identity names.
const TAG_LEN: usize = 4;

/// A freshly minted room-access credential.
///
/// Immutable once minted; discarded on disconnect. The room name stays
/// server-side — the wire response carries only the identity and token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Room the grant is scoped to.
    pub room_name: String,
    /// Participant identity the token was signed for.
    pub identity: String,
    /// Signed, time-bounded JWT.
    pub access_token: String,
}

/// Mints room-access credentials for conversation sessions.
///
/// Stateless: every [`mint`](Self::mint) call produces a fresh room and
/// identity pair. There is no idempotency guarantee and none is needed.
#[derive(Debug)]
pub struct TokenIssuer {
    config: LiveKitConfig,
}

impl TokenIssuer {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    /// Whether minting can succeed at all (signing keys present).
    pub fn is_configured(&self) -> bool {
        self.config.has_signing_keys()
    }

    /// Returns the browser-facing LiveKit URL clients should connect to.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Mints a credential for a new room/identity pair.
    ///
    /// The grant permits joining the minted room, publishing audio and
    /// data, subscribing, and updating the participant's own metadata.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Config`] when the signing keys are absent and
    /// [`VoiceError::LiveKit`] when signing fails.
    pub fn mint(&self) -> Result<Credential, VoiceError> {
        if !self.is_configured() {
            return Err(VoiceError::Config(
                "LiveKit signing keys are not set".to_string(),
            ));
        }

        let room_name = format!("parley-{}-{}", random_tag(), random_tag());
        let identity = format!("user-{}", random_tag());

        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(&identity)
            .with_name(&identity)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.clone(),
                can_publish: true,
                can_publish_data: true,
                can_subscribe: true,
                can_update_own_metadata: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        let access_token = token.to_jwt().map_err(VoiceError::LiveKit)?;

        tracing::debug!(room = %room_name, identity = %identity, "minted room credential");

        Ok(Credential {
            room_name,
            identity,
            access_token,
        })
    }
}

fn random_tag() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TAG_LEN)
        .map(char::from)
        .collect()
}
