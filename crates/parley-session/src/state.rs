//! Session phase state machine.
//!
//! [`SessionPhase`] names every stage of a conversation attempt. The
//! transitions are:
//!
//! ```text
//! NotRequested ──start──▶ CheckingPermission
//! CheckingPermission ──already granted──▶ Connecting
//!                    ──undetermined────▶ RequestingPermission
//! RequestingPermission ──granted──▶ Connecting
//!                      ──refused──▶ Disconnected   (denial surfaced)
//! Connecting ──room connected + agent audio──▶ Connected
//! Connected ──user disconnect──▶ Disconnected
//! Disconnected ──start──▶ CheckingPermission      (manual retry)
//! ```

use serde::{Deserialize, Serialize};

/// Phases of a conversation session, owned by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No conversation has been requested yet.
    #[default]
    NotRequested,

    /// Querying the current microphone permission without prompting.
    CheckingPermission,

    /// Prompting the user for microphone access.
    RequestingPermission,

    /// Permission resolved; fetching a credential and joining the room.
    Connecting,

    /// Room connected and the agent's audio track is available.
    Connected,

    /// The attempt ended, by user action, denial, or platform teardown.
    Disconnected,
}

impl SessionPhase {
    /// Whether a start action is accepted in this phase.
    pub fn can_start(self) -> bool {
        matches!(self, Self::NotRequested | Self::Disconnected)
    }

    /// Whether the attempt is between a start action and its outcome.
    ///
    /// The UI uses this to show a loading indicator on the start control.
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            Self::CheckingPermission | Self::RequestingPermission | Self::Connecting
        )
    }

    /// A short label suitable for logs and status display.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotRequested => "not-requested",
            Self::CheckingPermission => "checking-permission",
            Self::RequestingPermission => "requesting-permission",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}
