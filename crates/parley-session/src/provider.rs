//! Credential acquisition.

use crate::error::SessionError;
use parley_types::{ErrorResponse, TokenResponse};

/// Source of room-access credentials for a connection attempt.
///
/// One credential per attempt; nothing is cached or renewed.
#[allow(async_fn_in_trait)]
pub trait CredentialProvider {
    async fn fetch(&self) -> Result<TokenResponse, SessionError>;
}

/// Fetches credentials from the parley token endpoint.
#[derive(Debug, Clone)]
pub struct HttpCredentialProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCredentialProvider {
    /// Builds a provider for a server base URL (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let endpoint = format!("{}/api/token", base_url.as_ref().trim_end_matches('/'));
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// The full token endpoint URL this provider targets.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CredentialProvider for HttpCredentialProvider {
    async fn fetch(&self) -> Result<TokenResponse, SessionError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SessionError::Credential(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "token endpoint returned an error".to_string());
            return Err(SessionError::Credential(format!("{status}: {message}")));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| SessionError::Credential(format!("invalid token response: {e}")))
    }
}
