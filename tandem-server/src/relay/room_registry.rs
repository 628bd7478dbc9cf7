use crate::relay::Room;
use std::collections::{HashMap, HashSet};
use tandem_core::{RoomId, SessionId};
use tracing::{debug, info};

/// Room key → occupants, plus the reverse index used on disconnect.
///
/// Rooms exist only while occupied: the first join creates one, the last
/// leave drops it. A session may sit in several rooms at once; joining a
/// second room does not take it out of the first.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    memberships: HashMap<SessionId, HashSet<RoomId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `session` to `room` and returns the occupants that must be told a
    /// peer arrived. The joining session itself is never among them.
    pub fn join(&mut self, room_id: &RoomId, session: SessionId) -> Vec<SessionId> {
        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            Room::new(room_id.clone())
        });

        if !room.insert(session) {
            debug!("Session {} already in room {}", session, room_id);
        }

        self.memberships
            .entry(session)
            .or_default()
            .insert(room_id.clone());

        room.others(&session)
    }

    /// Everyone in `room` except `sender`. Membership of the sender is not checked.
    pub fn recipients(&self, room_id: &RoomId, sender: &SessionId) -> Vec<SessionId> {
        self.rooms
            .get(room_id)
            .map(|room| room.others(sender))
            .unwrap_or_default()
    }

    /// Removes `session` from every room it occupies and returns those rooms.
    pub fn leave(&mut self, session: &SessionId) -> Vec<RoomId> {
        let Some(rooms) = self.memberships.remove(session) else {
            return Vec::new();
        };

        let mut left: Vec<RoomId> = rooms.into_iter().collect();
        left.sort();

        for room_id in &left {
            let Some(room) = self.rooms.get_mut(room_id) else {
                continue;
            };
            room.remove(session);
            if room.is_empty() {
                info!("Room {} is empty, dropping it", room.id());
                self.rooms.remove(room_id);
            }
        }

        left
    }

    pub fn occupants(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map(Room::len).unwrap_or(0)
    }

    pub fn is_member(&self, room_id: &RoomId, session: &SessionId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|room| room.contains(session))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
