//! Client half of a tandem call.
//!
//! [`NegotiationEngine`] decides what happens next for every relay frame,
//! peer-connection event and completed operation. [`CallSession`] runs it
//! against a relay connection, a peer connection and local capture.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use std::sync::Arc;
//! use tandem_client::{EngineConfig, Phase, SyntheticMedia, start_call};
//!
//! let config = EngineConfig::new("http://localhost:3001", "abc");
//! let call = start_call(config, Arc::new(SyntheticMedia::new())).await?;
//! call.wait_for(|s| s.phase == Phase::Connected).await;
//! call.teardown().await;
//! # Ok(())
//! # }
//! ```

mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod session;
pub mod transport;

pub use config::EngineConfig;
pub use engine::{
    Command, EngineEvent, MediaInfo, NegotiationEngine, NegotiationState, Operation, Phase, Role,
};
pub use error::{CaptureError, EngineError, PeerError, TransportError};
pub use logger::{ConnectionLog, LogEntry};
pub use session::{CallHandle, CallSession, CallSnapshot, start_call};
pub use transport::{
    LocalMedia, MediaSource, PeerConnection, PeerEvent, SignalingTransport, SyntheticMedia,
    WebRtcPeer, WsTransport,
};
