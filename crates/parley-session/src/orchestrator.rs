//! The conversation orchestrator.
//!
//! [`Conversation`] owns the session state machine and sequences every
//! suspension point of an attempt — permission query, capture probe,
//! credential fetch, room connect — strictly one after another. Platform
//! events are applied through [`Conversation::handle_room_event`] (or the
//! [`Conversation::pump`] loop), and UI-facing [`SessionEvent`]s leave on
//! a broadcast channel.

use crate::error::SessionError;
use crate::platform::{MediaDevices, PermissionProbe, RoomConnector, RoomEvent, RoomHandle};
use crate::provider::CredentialProvider;
use crate::state::SessionPhase;
use parley_types::{
    ConnectionState, MicPermission, VoiceCatalog, VOICES_ATTRIBUTE, VOICE_ATTRIBUTE,
};
use tokio::sync::{broadcast, mpsc};

/// Capacity of the UI-facing session event channel.
const SESSION_EVENT_CAPACITY: usize = 64;

/// Message shown when the user refuses microphone access.
const PERMISSION_DENIED_MESSAGE: &str =
    "Microphone access is required to start a conversation. Enable it in your browser settings and try again.";

/// Events the orchestrator emits for the UI layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The session moved to a new phase.
    PhaseChanged(SessionPhase),

    /// The user refused microphone access; the attempt is over.
    PermissionDenied {
        /// User-facing denial message.
        message: String,
    },

    /// The agent published a new voice catalog.
    VoicesUpdated(VoiceCatalog),
}

struct ActiveRoom<H> {
    handle: H,
    events: mpsc::Receiver<RoomEvent>,
}

/// Client-side conversation session over the platform seams.
///
/// Generic over the media-device, room-connector, and credential seams so
/// each transition can be driven from tests with mocks.
pub struct Conversation<D, C, P>
where
    D: MediaDevices,
    C: RoomConnector,
    P: CredentialProvider,
{
    devices: D,
    connector: C,
    credentials: P,
    livekit_url: String,

    phase: SessionPhase,
    permission: MicPermission,
    room_state: ConnectionState,
    agent_track: Option<String>,
    room: Option<ActiveRoom<C::Handle>>,
    voices: VoiceCatalog,
    selected_voice: Option<String>,

    events_tx: broadcast::Sender<SessionEvent>,
}

impl<D, C, P> Conversation<D, C, P>
where
    D: MediaDevices,
    C: RoomConnector,
    P: CredentialProvider,
{
    pub fn new(
        devices: D,
        connector: C,
        credentials: P,
        livekit_url: impl Into<String>,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            devices,
            connector,
            credentials,
            livekit_url: livekit_url.into(),
            phase: SessionPhase::NotRequested,
            permission: MicPermission::Unknown,
            room_state: ConnectionState::Disconnected,
            agent_track: None,
            room: None,
            voices: VoiceCatalog::default(),
            selected_voice: None,
            events_tx,
        }
    }

    /// Subscribes to UI-facing session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn permission(&self) -> MicPermission {
        self.permission
    }

    /// The most recent voice catalog published by the agent.
    pub fn voices(&self) -> &VoiceCatalog {
        &self.voices
    }

    pub fn selected_voice(&self) -> Option<&str> {
        self.selected_voice.as_deref()
    }

    /// Runs a start action: resolve permission, fetch a credential, and
    /// open the room connection.
    ///
    /// Returns with the session in `Connecting`; the transition to
    /// `Connected` happens when the platform reports a connection and an
    /// agent audio track (see [`handle_room_event`](Self::handle_room_event)).
    ///
    /// # Errors
    ///
    /// [`SessionError::PermissionDenied`] when the user refuses the
    /// capture prompt — the denial is also surfaced as a
    /// [`SessionEvent::PermissionDenied`] and the session lands in
    /// `Disconnected`. Credential and connection failures likewise end
    /// the attempt in `Disconnected`. There are no automatic retries.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        if !self.phase.can_start() {
            return Err(SessionError::AlreadyActive);
        }

        self.set_phase(SessionPhase::CheckingPermission);
        let granted = match self.devices.query_permission().await {
            PermissionProbe::Granted => {
                self.permission = MicPermission::Granted;
                true
            }
            PermissionProbe::NotGranted => false,
            PermissionProbe::Unavailable => {
                tracing::warn!("permission API unavailable, falling back to capture request");
                false
            }
        };

        if !granted {
            self.set_phase(SessionPhase::RequestingPermission);
            if let Err(err) = self.devices.request_capture().await {
                tracing::warn!(error = %err, "microphone capture request refused");
                self.permission = MicPermission::Denied;
                self.set_phase(SessionPhase::Disconnected);
                let _ = self.events_tx.send(SessionEvent::PermissionDenied {
                    message: PERMISSION_DENIED_MESSAGE.to_string(),
                });
                return Err(SessionError::PermissionDenied);
            }
            self.permission = MicPermission::Granted;
        }

        self.set_phase(SessionPhase::Connecting);

        let credential = match self.credentials.fetch().await {
            Ok(credential) => credential,
            Err(err) => {
                self.set_phase(SessionPhase::Disconnected);
                return Err(err);
            }
        };
        tracing::debug!(identity = %credential.identity, "fetched room credential");

        match self
            .connector
            .connect(&self.livekit_url, &credential.access_token)
            .await
        {
            Ok((handle, events)) => {
                self.room = Some(ActiveRoom { handle, events });
                Ok(())
            }
            Err(err) => {
                self.set_phase(SessionPhase::Disconnected);
                Err(err)
            }
        }
    }

    /// Awaits the next platform event and applies it.
    ///
    /// Returns `Ok(false)` when there is no active room or the platform
    /// closed the event stream (the session is torn down in that case).
    pub async fn pump(&mut self) -> Result<bool, SessionError> {
        let event = match self.room.as_mut() {
            Some(room) => room.events.recv().await,
            None => return Ok(false),
        };
        match event {
            Some(event) => {
                self.handle_room_event(event).await?;
                Ok(true)
            }
            None => {
                self.teardown().await;
                Ok(false)
            }
        }
    }

    /// Applies one platform event to the session state machine.
    pub async fn handle_room_event(&mut self, event: RoomEvent) -> Result<(), SessionError> {
        match event {
            RoomEvent::ConnectionChanged(state) => {
                self.room_state = state;
                match state {
                    ConnectionState::Connected => self.try_enter_connected().await?,
                    ConnectionState::Disconnected => {
                        if self.room.is_some() {
                            tracing::info!("platform reported disconnect");
                            self.teardown().await;
                        }
                    }
                    ConnectionState::Connecting => {}
                }
            }
            RoomEvent::AgentTrackSubscribed { track_sid } => {
                self.agent_track = Some(track_sid);
                self.try_enter_connected().await?;
            }
            RoomEvent::AgentAttributesChanged { attributes } => {
                if let Some(payload) = attributes.get(VOICES_ATTRIBUTE) {
                    let catalog = VoiceCatalog::from_attribute(payload).map_err(|err| {
                        tracing::warn!(error = %err, "rejecting malformed voice catalog");
                        err
                    })?;
                    self.voices = catalog.clone();
                    let _ = self.events_tx.send(SessionEvent::VoicesUpdated(catalog));
                }
            }
        }
        Ok(())
    }

    /// Selects a voice; published immediately when connected, otherwise
    /// replayed once the session reaches `Connected`.
    pub async fn select_voice(&mut self, id: impl Into<String>) -> Result<(), SessionError> {
        let id = id.into();
        self.selected_voice = Some(id.clone());
        if self.phase == SessionPhase::Connected {
            if let Some(room) = self.room.as_ref() {
                room.handle.publish_attribute(VOICE_ATTRIBUTE, &id).await?;
            }
        }
        Ok(())
    }

    /// Explicit user disconnect: releases the microphone, leaves the
    /// room, and returns the session to `Disconnected`.
    pub async fn disconnect(&mut self) -> Result<(), SessionError> {
        if self.room.is_none() && self.phase.can_start() {
            return Ok(());
        }
        self.teardown().await;
        Ok(())
    }

    /// Enters `Connected` once both conditions hold: the platform reports
    /// a connection and an agent audio track is available.
    async fn try_enter_connected(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Connecting
            || self.room_state != ConnectionState::Connected
            || self.agent_track.is_none()
        {
            return Ok(());
        }

        self.set_phase(SessionPhase::Connected);
        self.devices.set_microphone_enabled(true).await?;

        if let (Some(id), Some(room)) = (self.selected_voice.clone(), self.room.as_ref()) {
            room.handle.publish_attribute(VOICE_ATTRIBUTE, &id).await?;
        }
        Ok(())
    }

    async fn teardown(&mut self) {
        if let Some(mut room) = self.room.take() {
            if let Err(err) = self.devices.set_microphone_enabled(false).await {
                tracing::warn!(error = %err, "failed to release microphone on disconnect");
            }
            room.handle.disconnect().await;
        }
        self.agent_track = None;
        self.room_state = ConnectionState::Disconnected;
        self.set_phase(SessionPhase::Disconnected);
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase == phase {
            return;
        }
        tracing::debug!(from = self.phase.label(), to = phase.label(), "session phase change");
        self.phase = phase;
        let _ = self.events_tx.send(SessionEvent::PhaseChanged(phase));
    }
}
