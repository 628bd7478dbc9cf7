//! Seams between the negotiation engine and the outside world, plus the
//! native implementations used outside of tests.

mod local_media;
mod peer_event;
mod synthetic_media;
mod webrtc_peer;
mod ws_transport;

pub use local_media::LocalMedia;
pub use peer_event::PeerEvent;
pub use synthetic_media::SyntheticMedia;
pub use webrtc_peer::WebRtcPeer;
pub use ws_transport::WsTransport;

use async_trait::async_trait;
use tandem_core::{ClientEvent, IceCandidate, ServerEvent, SessionDescription};

use crate::error::{CaptureError, PeerError, TransportError};

/// Message channel to the signaling relay.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    async fn send(&self, event: ClientEvent) -> Result<(), TransportError>;

    /// Next relay frame, or `None` once the connection is gone. Must be
    /// cancel-safe.
    async fn recv(&self) -> Option<ServerEvent>;

    async fn close(&self);
}

/// The real-time connection primitive that produces and consumes session
/// descriptions and candidates. Locally discovered candidates, ICE state
/// changes and inbound tracks are reported as [`PeerEvent`]s.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn add_local_media(&self, media: &LocalMedia) -> Result<(), PeerError>;

    /// Creates an offer and installs it as local description.
    async fn create_offer(&self) -> Result<SessionDescription, PeerError>;

    /// Applies `offer` as remote description, then creates and installs the
    /// answer.
    async fn accept_offer(&self, offer: SessionDescription)
    -> Result<SessionDescription, PeerError>;

    async fn apply_answer(&self, answer: SessionDescription) -> Result<(), PeerError>;

    /// May be called before any remote description exists.
    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerError>;

    async fn close(&self) -> Result<(), PeerError>;
}

/// Local camera and microphone capture.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> Result<LocalMedia, CaptureError>;
}
