use tandem_core::{ClientEvent, IceCandidate, Payload, SdpType, ServerEvent, SessionDescription};

use crate::engine::{Command, NegotiationEngine, Phase, Role};
use crate::error::EngineError;

impl NegotiationEngine {
    pub(super) fn handle_signal(&mut self, signal: ServerEvent) -> Vec<Command> {
        tracing::debug!("Signal {} in phase {}", signal.name(), self.state.phase);

        match signal {
            ServerEvent::UserConnected => self.on_user_connected(),
            ServerEvent::Offer(payload) => self.handle_remote_offer(payload),
            ServerEvent::Answer(payload) => self.on_remote_answer(payload),
            ServerEvent::IceCandidate(payload) => self.on_remote_candidate(payload),
        }
    }

    /// The occupant that was already present always becomes the caller.
    fn on_user_connected(&mut self) -> Vec<Command> {
        if !self.state.joined {
            self.log.warn("Peer joined before this side joined, ignoring");
            return Vec::new();
        }
        if let Some(role) = self.state.role {
            self.log.warn(format!(
                "Another user connected while acting as {:?}, ignoring",
                role
            ));
            return Vec::new();
        }

        self.log.info("User connected, creating offer");
        self.state.role = Some(Role::Caller);
        self.set_phase(Phase::Offering);
        vec![Command::CreateOffer]
    }

    fn on_remote_answer(&mut self, payload: Payload) -> Vec<Command> {
        let has_offer = matches!(
            &self.state.local_description,
            Some(desc) if desc.sdp_type == SdpType::Offer
        );
        if !has_offer {
            self.log.warn("Received answer without a local offer, ignoring");
            return Vec::new();
        }
        if self.state.remote_description.is_some() {
            self.log.warn("Received duplicate answer, ignoring");
            return Vec::new();
        }

        match SessionDescription::from_payload(&payload, SdpType::Answer) {
            Ok(answer) => {
                self.log.info("Received answer");
                self.state.remote_description = Some(answer.clone());
                vec![Command::ApplyAnswer(answer)]
            }
            Err(e) => {
                self.log.error(format!("Invalid answer: {}", e));
                self.fail(EngineError::EstablishConnection);
                Vec::new()
            }
        }
    }

    /// Candidates are applied whatever the phase; the peer connection buffers
    /// the ones that arrive ahead of a remote description.
    fn on_remote_candidate(&mut self, payload: Payload) -> Vec<Command> {
        match IceCandidate::from_payload(&payload) {
            Ok(candidate) => vec![Command::AddRemoteCandidate(candidate)],
            Err(e) => {
                self.log.error(format!("Error adding ICE candidate: {}", e));
                self.state.latest_error = Some(EngineError::EstablishConnection);
                Vec::new()
            }
        }
    }

    pub(super) fn on_offer_created(&mut self, offer: SessionDescription) -> Vec<Command> {
        self.log.info("Sending offer");
        let payload = offer.to_payload();
        self.state.local_description = Some(offer);
        self.enter_negotiating();
        vec![Command::Send(ClientEvent::Offer {
            offer: payload,
            room: self.room.clone(),
        })]
    }

    pub(super) fn on_answer_created(&mut self, answer: SessionDescription) -> Vec<Command> {
        self.log.info("Sending answer");
        let payload = answer.to_payload();
        self.state.local_description = Some(answer);
        self.enter_negotiating();
        vec![Command::Send(ClientEvent::Answer {
            answer: payload,
            room: self.room.clone(),
        })]
    }

    pub(super) fn on_remote_answer_applied(&mut self) -> Vec<Command> {
        self.log.info("Remote description set, connection established");
        self.set_phase(Phase::Connected);
        Vec::new()
    }

    // A remote track may already have moved us to Connected.
    fn enter_negotiating(&mut self) {
        if self.state.phase != Phase::Connected {
            self.set_phase(Phase::Negotiating);
        }
    }
}
