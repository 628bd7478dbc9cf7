//! Room-scoped signaling relay.
//!
//! Clients connect over WebSocket, join a room by key and exchange opaque
//! offer/answer/ICE payloads with the other occupants. The relay never looks
//! inside those payloads and keeps no state beyond room membership.

mod app;
mod config;
mod relay;
mod signaling;

pub use app::*;
pub use config::*;
pub use relay::*;
pub use signaling::*;
