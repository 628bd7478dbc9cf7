use tandem_core::{ClientEvent, IceCandidate};

use crate::engine::{Command, NegotiationEngine, Phase};

impl NegotiationEngine {
    /// Sends `join-room` once both the relay connection and local capture are
    /// up, then flushes candidates gathered in the meantime.
    pub(super) fn try_join(&mut self) -> Vec<Command> {
        let ready = self.state.phase == Phase::Initializing
            && self.state.transport_connected
            && self.state.media.is_some()
            && !self.state.media_failed;
        if !ready {
            return Vec::new();
        }

        self.log.info(format!("Joining room {}", self.room));
        let mut commands = vec![Command::Send(ClientEvent::JoinRoom(self.room.clone()))];
        self.state.joined = true;
        self.set_phase(Phase::Joined);
        self.set_phase(Phase::WaitingForPeer);

        while let Some(candidate) = self.state.pending_candidates.pop_front() {
            commands.extend(self.send_candidate(candidate));
        }
        commands
    }

    pub(super) fn on_local_candidate(&mut self, candidate: IceCandidate) -> Vec<Command> {
        if !self.state.joined {
            self.state.pending_candidates.push_back(candidate);
            return Vec::new();
        }
        self.send_candidate(candidate)
    }

    fn send_candidate(&mut self, candidate: IceCandidate) -> Vec<Command> {
        match candidate.to_payload() {
            Ok(payload) => {
                tracing::debug!("Sending ICE candidate {}", candidate.candidate);
                vec![Command::Send(ClientEvent::IceCandidate {
                    candidate: payload,
                    room: self.room.clone(),
                })]
            }
            Err(e) => {
                self.log.warn(format!("Dropping local ICE candidate: {}", e));
                Vec::new()
            }
        }
    }
}
