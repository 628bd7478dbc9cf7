use crate::engine::{Command, NegotiationEngine, Operation, Phase};
use crate::error::EngineError;

impl NegotiationEngine {
    pub(super) fn on_operation_failed(&mut self, op: Operation, reason: String) -> Vec<Command> {
        match op {
            Operation::CreateOffer => {
                self.log.error(format!("Error creating offer: {}", reason));
                self.fail(EngineError::InitiateCall);
            }
            Operation::AcceptOffer => {
                self.log.error(format!("Error handling offer: {}", reason));
                self.state.remote_description = None;
                self.fail(EngineError::ConnectRemote);
            }
            Operation::ApplyAnswer => {
                self.log.error(format!("Error handling answer: {}", reason));
                self.state.remote_description = None;
                self.fail(EngineError::EstablishConnection);
            }
            Operation::AddCandidate => {
                // Other candidates may still succeed.
                self.log.error(format!("Error adding ICE candidate: {}", reason));
                self.state.latest_error = Some(EngineError::EstablishConnection);
            }
        }
        Vec::new()
    }

    /// Records a user-facing error and enters `Error`. Inbound messages keep
    /// being processed afterwards.
    pub(super) fn fail(&mut self, err: EngineError) {
        self.state.latest_error = Some(err);
        self.set_phase(Phase::Error);
    }
}
