use tandem_core::{RoomId, ServerEvent, SessionId};

/// Commands the signaling front-end feeds into the relay loop.
#[derive(Debug)]
pub enum RelayCommand {
    /// A session asked to occupy a room.
    Join { session: SessionId, room: RoomId },

    /// Fan `event` out to every occupant of `room` except `session`.
    Forward {
        session: SessionId,
        room: RoomId,
        event: ServerEvent,
    },

    /// The session's transport went away.
    Leave { session: SessionId },
}
