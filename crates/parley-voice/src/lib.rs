//! LiveKit integration for the parley platform.
//!
//! Mints short-lived, signed room-access credentials for the voice
//! assistant: each mint produces a fresh room name and participant
//! identity, builds the fixed grant set the conversation needs (join,
//! publish, subscribe, metadata update), and signs a time-bounded JWT
//! with the server-held API key pair.
//!
//! Token cryptography itself is owned by `livekit-api`; this crate only
//! decides what goes into the grant and when minting is allowed.

pub mod config;
pub mod error;
pub mod issuer;

pub use config::LiveKitConfig;
pub use error::VoiceError;
pub use issuer::{Credential, TokenIssuer};
