//! Shared types for the parley voice-assistant platform.
//!
//! This crate provides the wire and state types used across the parley
//! crates: the credential response returned by the token endpoint, the
//! platform connection state, the local microphone permission state, and
//! the validated voice-catalog payload published by the agent.
//!
//! No crate in the workspace depends on anything *except* `parley-types`
//! for cross-cutting type definitions. This keeps the dependency graph
//! clean and prevents circular dependencies.

pub mod catalog;

pub use catalog::{CatalogError, Voice, VoiceCatalog, VOICES_ATTRIBUTE, VOICE_ATTRIBUTE};

use serde::{Deserialize, Serialize};

/// Connection state of the real-time room, as reported by the media
/// platform. The orchestrator only reads and reacts to this; it never
/// sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No active room connection.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// The room connection is established.
    Connected,
}

impl ConnectionState {
    /// Returns the string label for this state.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

/// Local microphone permission state.
///
/// Mutated only by the permission check/request flow; `Denied` is terminal
/// for a connection attempt and requires a manual retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicPermission {
    /// Permission has not been determined yet.
    #[default]
    Unknown,
    /// The user granted microphone access.
    Granted,
    /// The user refused microphone access.
    Denied,
}

/// Wire shape returned by `GET /api/token` on success.
///
/// Field names are camelCase on the wire to match the client contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Participant identity the credential was minted for.
    pub identity: String,
    /// Signed, time-bounded room access token.
    pub access_token: String,
}

/// Wire shape returned by the token endpoint on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Generic, caller-safe error message. The specific cause is logged
    /// server-side only.
    pub error: String,
}
