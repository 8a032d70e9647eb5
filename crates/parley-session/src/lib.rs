//! Conversation session logic for the parley voice assistant.
//!
//! The original connect flow was a chain of asynchronous callbacks; here
//! it is an explicit state machine: named phases, transition functions,
//! and platform seams as traits so permission, credential, and connection
//! paths are independently testable.
//!
//! The flow: a user start action checks microphone permission (prompting
//! if undetermined), fetches a room credential from the token endpoint,
//! connects to the room, and — once the platform reports a connection and
//! an agent audio track — enables the microphone and publishes the
//! selected voice. Permission denial is terminal for the attempt; the
//! user retries manually.

pub mod error;
pub mod orchestrator;
pub mod platform;
pub mod provider;
pub mod state;

pub use error::SessionError;
pub use orchestrator::{Conversation, SessionEvent};
pub use platform::{MediaDevices, PermissionProbe, RoomConnector, RoomEvent, RoomHandle};
pub use provider::{CredentialProvider, HttpCredentialProvider};
pub use state::SessionPhase;
