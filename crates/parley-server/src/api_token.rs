//! Credential endpoint: mints a fresh room-access token per request.

use crate::AppState;
use axum::{extract::Extension, http::StatusCode, response::Json};
use parley_types::{ErrorResponse, TokenResponse};
use std::sync::Arc;

/// Generic message for configuration and signing failures. The specific
/// cause is logged server-side only.
const SERVER_ERROR_MESSAGE: &str = "token service is not set up correctly";

/// GET /api/token
///
/// Mints a credential scoped to a newly generated room/identity pair.
/// Every call creates a fresh room; there is no idempotency guarantee.
pub async fn issue_token_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !state.issuer.is_configured() {
        tracing::error!("token requested but LiveKit signing keys are not configured");
        return Err(server_error());
    }

    let credential = state.issuer.mint().map_err(|err| {
        tracing::error!(error = %err, "failed to mint room credential");
        server_error()
    })?;

    tracing::debug!(identity = %credential.identity, "issued room credential");

    Ok(Json(TokenResponse {
        identity: credential.identity,
        access_token: credential.access_token,
    }))
}

fn server_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: SERVER_ERROR_MESSAGE.to_string(),
        }),
    )
}
