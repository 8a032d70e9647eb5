use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// The user refused microphone access. Terminal for the attempt.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// The media layer offers no way to request capture access.
    #[error("media capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// The token endpoint could not supply a credential.
    #[error("credential fetch failed: {0}")]
    Credential(String),

    /// Platform-level connection failure, not further classified.
    #[error("room connection failed: {0}")]
    Connection(String),

    /// The agent published a voice catalog the client refuses to accept.
    #[error("voice catalog rejected: {0}")]
    Catalog(#[from] parley_types::CatalogError),

    /// A start action arrived while an attempt was already in flight.
    #[error("a session attempt is already in progress")]
    AlreadyActive,
}
