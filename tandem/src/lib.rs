//! Two-party WebRTC calls: a room-scoped signaling relay and the client-side
//! negotiation engine that talks to it.
//!
//! The wire model is always available; enable `server` for the relay and
//! `client` for the engine.

pub use tandem_core::{RoomId, SessionId};

pub mod model {
    pub use tandem_core::model::*;
    pub use tandem_core::utils::IceServerConfig;
    pub use tandem_core::ProtocolError;
}

#[cfg(feature = "server")]
pub mod server {
    pub use tandem_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use tandem_client::*;
}
