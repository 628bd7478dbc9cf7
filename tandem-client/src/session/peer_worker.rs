use std::sync::Arc;

use tandem_core::{IceCandidate, SessionDescription};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::{EngineEvent, Operation};
use crate::session::Completion;
use crate::transport::PeerConnection;

#[derive(Debug)]
pub(crate) enum PeerOp {
    CreateOffer,
    AcceptOffer(SessionDescription),
    ApplyAnswer(SessionDescription),
    AddCandidate(IceCandidate),
}

/// Runs peer-connection operations one at a time, in submission order, and
/// reports each outcome back to the session loop.
pub(crate) struct PeerWorker {
    op_tx: mpsc::UnboundedSender<PeerOp>,
    task: JoinHandle<()>,
}

impl PeerWorker {
    pub(crate) fn spawn(
        peer: Arc<dyn PeerConnection>,
        done_tx: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        let (op_tx, mut op_rx) = mpsc::unbounded_channel::<PeerOp>();

        let task = tokio::spawn(async move {
            while let Some(op) = op_rx.recv().await {
                debug!("Peer op {:?}", op);
                let event = perform(peer.as_ref(), op).await;
                if let Some(event) = event {
                    if done_tx.send(Completion::Engine(event)).is_err() {
                        break;
                    }
                }
            }
        });

        Self { op_tx, task }
    }

    pub(crate) fn submit(&self, op: PeerOp) {
        if self.op_tx.send(op).is_err() {
            debug!("Peer worker stopped, dropping operation");
        }
    }

    pub(crate) fn shutdown(&self) {
        self.task.abort();
    }
}

async fn perform(peer: &dyn PeerConnection, op: PeerOp) -> Option<EngineEvent> {
    let failed = |op, e: crate::error::PeerError| EngineEvent::OperationFailed {
        op,
        reason: e.to_string(),
    };

    match op {
        PeerOp::CreateOffer => Some(match peer.create_offer().await {
            Ok(offer) => EngineEvent::OfferCreated(offer),
            Err(e) => failed(Operation::CreateOffer, e),
        }),
        PeerOp::AcceptOffer(offer) => Some(match peer.accept_offer(offer).await {
            Ok(answer) => EngineEvent::AnswerCreated(answer),
            Err(e) => failed(Operation::AcceptOffer, e),
        }),
        PeerOp::ApplyAnswer(answer) => Some(match peer.apply_answer(answer).await {
            Ok(()) => EngineEvent::RemoteAnswerApplied,
            Err(e) => failed(Operation::ApplyAnswer, e),
        }),
        PeerOp::AddCandidate(candidate) => match peer.add_ice_candidate(candidate).await {
            Ok(()) => None,
            Err(e) => Some(failed(Operation::AddCandidate, e)),
        },
    }
}
