//! Negotiation state machine for one side of a call.
//!
//! [`NegotiationEngine::step`] takes one [`EngineEvent`] and returns the
//! [`Command`]s the caller has to carry out. It performs no I/O itself, so a
//! whole handshake can be replayed from a list of synthetic events.

use std::collections::VecDeque;
use std::fmt;

use tandem_core::{IceCandidate, RoomId, ServerEvent, SessionDescription};
use tracing::debug;

use crate::error::{CaptureError, EngineError};
use crate::logger::ConnectionLog;

mod handle_failure_impl;
mod handle_remote_offer_impl;
mod handle_signal_impl;
mod init_connection_impl;
mod join_impl;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Initializing,
    Joined,
    WaitingForPeer,
    Offering,
    Negotiating,
    Connected,
    Error,
    Closed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initializing => "initializing",
            Phase::Joined => "joined",
            Phase::WaitingForPeer => "waiting for peer",
            Phase::Offering => "offering",
            Phase::Negotiating => "negotiating",
            Phase::Connected => "connected",
            Phase::Error => "error",
            Phase::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Was in the room first and sends the offer.
    Caller,
    /// Joined second and only ever answers.
    Callee,
}

/// Asynchronous peer-connection steps whose failure is reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateOffer,
    AcceptOffer,
    ApplyAnswer,
    AddCandidate,
}

/// Summary of the captured local stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub stream_id: String,
    pub audio: bool,
    pub video: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    TransportConnected,
    TransportClosed { reason: String },
    MediaAcquired(MediaInfo),
    MediaFailed(CaptureError),
    Signal(ServerEvent),
    LocalCandidate(IceCandidate),
    OfferCreated(SessionDescription),
    AnswerCreated(SessionDescription),
    RemoteAnswerApplied,
    OperationFailed { op: Operation, reason: String },
    RemoteTrack { kind: String },
    IceStateChanged(String),
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(tandem_core::ClientEvent),
    /// Create an offer and install it as local description; report
    /// `OfferCreated` or `OperationFailed`.
    CreateOffer,
    /// Apply the offer as remote description, create and install an answer;
    /// report `AnswerCreated` or `OperationFailed`.
    AcceptOffer(SessionDescription),
    /// Apply the answer as remote description; report `RemoteAnswerApplied`
    /// or `OperationFailed`.
    ApplyAnswer(SessionDescription),
    AddRemoteCandidate(IceCandidate),
    /// Close the transport, the negotiation handle and release capture.
    Close,
}

/// Everything the engine knows about its half of the call.
#[derive(Debug, Clone, Default)]
pub struct NegotiationState {
    pub phase: Phase,
    pub role: Option<Role>,
    pub media: Option<MediaInfo>,
    pub media_failed: bool,
    pub transport_connected: bool,
    pub joined: bool,
    pub local_description: Option<SessionDescription>,
    pub remote_description: Option<SessionDescription>,
    /// Local candidates found before `join-room` went out.
    pub pending_candidates: VecDeque<IceCandidate>,
    pub remote_connected: bool,
    pub latest_error: Option<EngineError>,
}

pub struct NegotiationEngine {
    room: RoomId,
    state: NegotiationState,
    log: ConnectionLog,
}

impl NegotiationEngine {
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            state: NegotiationState::default(),
            log: ConnectionLog::new(),
        }
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn role(&self) -> Option<Role> {
        self.state.role
    }

    pub fn state(&self) -> &NegotiationState {
        &self.state
    }

    pub fn log(&self) -> &ConnectionLog {
        &self.log
    }

    pub fn latest_error(&self) -> Option<&EngineError> {
        self.state.latest_error.as_ref()
    }

    pub fn step(&mut self, event: EngineEvent) -> Vec<Command> {
        if self.state.phase == Phase::Closed {
            debug!("Call closed, ignoring {:?}", event);
            return Vec::new();
        }

        match event {
            EngineEvent::TransportConnected => self.on_transport_connected(),
            EngineEvent::TransportClosed { reason } => self.on_transport_closed(reason),
            EngineEvent::MediaAcquired(info) => self.on_media_acquired(info),
            EngineEvent::MediaFailed(err) => self.on_media_failed(err),
            EngineEvent::Signal(signal) => self.handle_signal(signal),
            EngineEvent::LocalCandidate(candidate) => self.on_local_candidate(candidate),
            EngineEvent::OfferCreated(offer) => self.on_offer_created(offer),
            EngineEvent::AnswerCreated(answer) => self.on_answer_created(answer),
            EngineEvent::RemoteAnswerApplied => self.on_remote_answer_applied(),
            EngineEvent::OperationFailed { op, reason } => self.on_operation_failed(op, reason),
            EngineEvent::RemoteTrack { kind } => self.on_remote_track(kind),
            EngineEvent::IceStateChanged(state) => {
                self.log.info(format!("ICE connection state: {}", state));
                Vec::new()
            }
            EngineEvent::Teardown => self.on_teardown(),
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase == phase {
            return;
        }
        debug!("Phase {} -> {}", self.state.phase, phase);
        self.state.phase = phase;
    }

    fn on_remote_track(&mut self, kind: String) -> Vec<Command> {
        self.log.info(format!("Received remote {} track", kind));
        self.state.remote_connected = true;
        self.set_phase(Phase::Connected);
        Vec::new()
    }

    fn on_teardown(&mut self) -> Vec<Command> {
        self.log.info("Closing call");
        self.set_phase(Phase::Closed);
        vec![Command::Close]
    }
}
