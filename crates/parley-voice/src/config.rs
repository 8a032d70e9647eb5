use serde::{Deserialize, Serialize};
use std::fmt;

fn default_token_ttl_seconds() -> u64 {
    3600
}

/// LiveKit connection and signing settings.
///
/// The secret never appears in `Debug` output or serialized form.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    /// Browser-facing LiveKit server URL (`wss://...`).
    pub url: String,
    /// API key identifying the signing key pair.
    pub api_key: String,
    /// Signing secret paired with `api_key`.
    #[serde(skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for room join tokens. Default: 3600 (1 hour).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }

    /// Whether both halves of the signing key pair are present.
    pub fn has_signing_keys(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}
