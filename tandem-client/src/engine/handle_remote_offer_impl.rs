use tandem_core::{Payload, SdpType, SessionDescription};

use crate::engine::{Command, NegotiationEngine, Role};
use crate::error::EngineError;

impl NegotiationEngine {
    pub(super) fn handle_remote_offer(&mut self, payload: Payload) -> Vec<Command> {
        if !self.state.joined {
            self.log.warn("Received offer before joining the room, ignoring");
            return Vec::new();
        }

        let offer = match SessionDescription::from_payload(&payload, SdpType::Offer) {
            Ok(offer) => offer,
            Err(e) => {
                self.log.error(format!("Invalid offer: {}", e));
                self.fail(EngineError::ConnectRemote);
                return Vec::new();
            }
        };

        match self.state.role {
            None => self.state.role = Some(Role::Callee),
            Some(Role::Caller) => {
                // Both sides believed they were first; the offer is still
                // applied and the peer connection decides.
                self.log.warn("Received offer while acting as caller");
            }
            Some(Role::Callee) => self.log.info("Received renegotiation offer"),
        }

        self.log.info("Received offer, creating answer");
        self.state.remote_description = Some(offer.clone());
        vec![Command::AcceptOffer(offer)]
    }
}
