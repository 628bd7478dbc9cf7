use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{ServerEvent, SessionId};
use tandem_server::SignalingOutput;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub session: SessionId,
    pub event: ServerEvent,
}

/// Mock SignalingOutput that captures every delivery the relay makes.
#[derive(Clone)]
pub struct MockSignalingOutput {
    tx: mpsc::UnboundedSender<Delivery>,
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl MockSignalingOutput {
    /// Create a new MockSignalingOutput and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            deliveries: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// All events delivered to `session`, in delivery order.
    pub async fn delivered_to(&self, session: &SessionId) -> Vec<ServerEvent> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter(|d| &d.session == session)
            .map(|d| d.event.clone())
            .collect()
    }

    pub async fn total(&self) -> usize {
        self.deliveries.lock().await.len()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn deliver(&self, session: &SessionId, event: ServerEvent) {
        tracing::debug!("[MockSignaling] {} to {}", event.name(), session);

        let delivery = Delivery {
            session: *session,
            event,
        };
        self.deliveries.lock().await.push(delivery.clone());
        let _ = self.tx.send(delivery);
    }
}
