use axum::body::Body;
use axum::http::{Request, StatusCode};
use parley_server::{app, AppState};
use parley_voice::{LiveKitConfig, TokenIssuer};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const DEFAULT_URL: &str = "wss://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "devsecret-devsecret-devsecret-00";

fn test_app(config: LiveKitConfig) -> axum::Router {
    app(AppState {
        issuer: Arc::new(TokenIssuer::new(config)),
    })
}

fn configured_app() -> axum::Router {
    test_app(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_check_returns_ok() {
    let (status, json) = get_json(configured_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn token_endpoint_returns_identity_and_token() {
    let (status, json) = get_json(configured_app(), "/api/token").await;
    assert_eq!(status, StatusCode::OK);

    let identity = json["identity"].as_str().unwrap();
    let tag = identity
        .strip_prefix("user-")
        .expect("identity should start with user-");
    assert_eq!(tag.len(), 4);
    assert!(tag.chars().all(|c| c.is_ascii_alphanumeric()));

    let token = json["accessToken"].as_str().unwrap();
    assert!(!token.is_empty());
}

#[tokio::test]
async fn each_request_mints_a_fresh_credential() {
    let app = configured_app();

    let (_, first) = get_json(app.clone(), "/api/token").await;
    let (_, second) = get_json(app, "/api/token").await;

    // Fresh room and identity per call, so the signed tokens never repeat.
    assert_ne!(first["accessToken"], second["accessToken"]);
}

#[tokio::test]
async fn missing_signing_keys_yield_a_server_error() {
    let app = test_app(LiveKitConfig::new(DEFAULT_URL, "", ""));

    let (status, json) = get_json(app, "/api/token").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error = json["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(json.get("accessToken").is_none(), "no token on failure");
}
