mod description;
mod room;
mod session;
mod signaling;

pub use description::{IceCandidate, SdpType, SessionDescription};
pub use room::RoomId;
pub use session::SessionId;
pub use signaling::{ClientEvent, Payload, Routing, ServerEvent};
