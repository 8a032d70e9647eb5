//! Voice catalog definitions.
//!
//! The agent publishes the set of voices it can speak with as a JSON
//! payload inside its participant attributes. This module gives that
//! payload a validated shape so the client never parses it ad hoc and
//! silent drift in the attribute format surfaces as a typed error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Agent attribute key carrying the JSON-encoded voice list.
pub const VOICES_ATTRIBUTE: &str = "voices";

/// Local participant attribute key carrying the selected voice id.
pub const VOICE_ATTRIBUTE: &str = "voice";

/// A single selectable voice, as published by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// Unique identifier for the voice.
    pub id: String,
    /// Owning user, if the voice is not a stock one.
    pub user_id: Option<String>,
    /// Whether the voice is visible to all users.
    pub is_public: bool,
    /// Human-readable name.
    pub name: String,
    /// Short description shown in the selector.
    pub description: String,
    /// When the voice was created.
    pub created_at: DateTime<Utc>,
    /// Embedding vector identifying the voice in the provider's space.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

/// Errors raised when decoding the voice-catalog attribute.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The payload was not valid JSON for the documented shape.
    #[error("malformed voice catalog payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A voice entry carried an empty id.
    #[error("voice catalog entry {0} has an empty id")]
    EmptyId(usize),
}

/// The validated voice list decoded from the agent's `voices` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    /// Decodes and validates a catalog from the raw attribute payload.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the payload is not a JSON array of the
    /// documented voice shape, or if an entry has an empty id.
    pub fn from_attribute(payload: &str) -> Result<Self, CatalogError> {
        let voices: Vec<Voice> = serde_json::from_str(payload)?;
        if let Some(pos) = voices.iter().position(|v| v.id.is_empty()) {
            return Err(CatalogError::EmptyId(pos));
        }
        Ok(Self { voices })
    }

    /// Returns the voices in catalog order.
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Looks up a voice by id.
    pub fn get(&self, id: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }
}
