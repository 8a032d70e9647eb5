//! Seams over the external media platform.
//!
//! The real-time transport, capture devices, and room client are owned by
//! the platform SDK. The orchestrator talks to them through these traits
//! so every transition is drivable from tests with mock implementations.

use crate::error::SessionError;
use parley_types::ConnectionState;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Outcome of a non-interactive microphone permission query.
///
/// `Unavailable` (the permission API itself is missing) is kept distinct
/// from `NotGranted` so callers can tell "cannot ask" apart from "not yet
/// asked"; both fall through to an explicit capture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionProbe {
    /// The user has already granted microphone access.
    Granted,
    /// Permission is undetermined or was previously refused.
    NotGranted,
    /// The permission API is not available on this platform.
    Unavailable,
}

/// Seam over the local media-device layer.
#[allow(async_fn_in_trait)]
pub trait MediaDevices {
    /// Queries the current microphone permission without prompting.
    async fn query_permission(&self) -> PermissionProbe;

    /// Prompts for capture access by transiently acquiring the device.
    ///
    /// The capture handle is released again before this returns; the
    /// acquisition exists solely to learn the user's answer. An error
    /// means the user refused or the device cannot be opened.
    async fn request_capture(&self) -> Result<(), SessionError>;

    /// Enables or disables the local microphone track.
    async fn set_microphone_enabled(&self, enabled: bool) -> Result<(), SessionError>;
}

/// Events the platform delivers for an active room connection.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// The platform-owned connection state changed.
    ConnectionChanged(ConnectionState),

    /// A remote agent audio track became available.
    AgentTrackSubscribed {
        /// Platform identifier of the subscribed track.
        track_sid: String,
    },

    /// The agent's participant attributes changed.
    AgentAttributesChanged {
        /// Full attribute map as published by the agent.
        attributes: HashMap<String, String>,
    },
}

/// Seam over the platform's room client.
#[allow(async_fn_in_trait)]
pub trait RoomConnector {
    type Handle: RoomHandle;

    /// Connects to a room with a signed access token.
    ///
    /// Events for the connection arrive on the returned receiver; the
    /// channel closing means the platform tore the connection down.
    async fn connect(
        &self,
        url: &str,
        token: &str,
    ) -> Result<(Self::Handle, mpsc::Receiver<RoomEvent>), SessionError>;
}

/// An established room connection.
#[allow(async_fn_in_trait)]
pub trait RoomHandle {
    /// Publishes a local participant attribute to the session.
    async fn publish_attribute(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Leaves the room.
    async fn disconnect(&mut self);
}
