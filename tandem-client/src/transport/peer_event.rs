use tandem_core::IceCandidate;

use crate::engine::{EngineEvent, Operation};

/// Events the peer connection raises on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerEvent {
    /// A local candidate was gathered and has to reach the remote side.
    LocalCandidate(IceCandidate),

    /// The remote side started sending media.
    RemoteTrack { kind: String },

    IceStateChanged(String),

    /// A remote candidate held back until the remote description arrived
    /// was refused when it was finally applied.
    CandidateRejected(String),
}

impl From<PeerEvent> for EngineEvent {
    fn from(event: PeerEvent) -> Self {
        match event {
            PeerEvent::LocalCandidate(candidate) => EngineEvent::LocalCandidate(candidate),
            PeerEvent::RemoteTrack { kind } => EngineEvent::RemoteTrack { kind },
            PeerEvent::IceStateChanged(state) => EngineEvent::IceStateChanged(state),
            PeerEvent::CandidateRejected(reason) => EngineEvent::OperationFailed {
                op: Operation::AddCandidate,
                reason,
            },
        }
    }
}
