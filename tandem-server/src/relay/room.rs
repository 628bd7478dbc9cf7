use std::collections::HashSet;
use tandem_core::{RoomId, SessionId};

/// Unordered occupant set of one rendezvous key.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    occupants: HashSet<SessionId>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            occupants: HashSet::new(),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Returns false if the session was already present.
    pub fn insert(&mut self, session: SessionId) -> bool {
        self.occupants.insert(session)
    }

    pub fn remove(&mut self, session: &SessionId) -> bool {
        self.occupants.remove(session)
    }

    pub fn contains(&self, session: &SessionId) -> bool {
        self.occupants.contains(session)
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    /// Everyone in the room but `sender`.
    pub fn others(&self, sender: &SessionId) -> Vec<SessionId> {
        self.occupants
            .iter()
            .filter(|s| *s != sender)
            .copied()
            .collect()
    }
}
