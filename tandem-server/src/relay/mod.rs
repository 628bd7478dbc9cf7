mod relay;
mod relay_command;
mod room;
mod room_registry;

pub use relay::*;
pub use relay_command::*;
pub use room::*;
pub use room_registry::*;
