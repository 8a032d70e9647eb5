//! Parley server library logic.

pub mod api_token;
pub mod config;

use axum::{extract::DefaultBodyLimit, routing::get, Extension, Json, Router};
use parley_voice::TokenIssuer;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential issuer for conversation rooms.
    pub issuer: Arc<TokenIssuer>,
}

/// Maximum request body size (64 KiB). The API takes no uploads.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load
/// balancers, monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/token", get(api_token::issue_token_handler));

    // Serve client static files if the directory exists.
    // Configured via PARLEY_CLIENT_DIR env var; defaults to "client/dist".
    let client_dir =
        std::env::var("PARLEY_CLIENT_DIR").unwrap_or_else(|_| "client/dist".to_string());
    let router = if std::path::Path::new(&client_dir).join("index.html").exists() {
        tracing::info!(path = %client_dir, "serving client static files");
        let index = format!("{}/index.html", client_dir);
        router.fallback_service(ServeDir::new(&client_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::info!(path = %client_dir, "client directory not found, skipping static file serving");
        router
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
