use crate::relay::RelayCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{ServerEvent, SessionId};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Outgoing queues of the connected sessions. This is the relay loop's side
/// of the service: it can deliver frames but holds no way back into the loop.
#[derive(Clone, Default)]
pub struct SessionOutbox {
    sessions: Arc<DashMap<SessionId, mpsc::UnboundedSender<Message>>>,
}

impl SessionOutbox {
    pub fn send_event(&self, session: &SessionId, event: &ServerEvent) {
        let Some(tx) = self.sessions.get(session) else {
            warn!("Attempted to deliver {} to disconnected session {}", event.name(), session);
            return;
        };

        match event.to_json() {
            Ok(json) => {
                if let Err(e) = tx.send(Message::Text(json.into())) {
                    error!("Failed to queue WS message for {}: {:?}", session, e);
                }
            }
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SessionOutbox {
    async fn deliver(&self, session: &SessionId, event: ServerEvent) {
        self.send_event(session, &event);
    }
}

/// Connected WebSocket sessions plus the handle into the relay loop.
///
/// Once every clone is dropped the relay's command channel closes and its
/// loop exits.
#[derive(Clone)]
pub struct SignalingService {
    outbox: SessionOutbox,
    relay_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(outbox: SessionOutbox, relay_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self { outbox, relay_tx }
    }

    pub fn add_session(&self, session: SessionId, tx: mpsc::UnboundedSender<Message>) {
        self.outbox.sessions.insert(session, tx);
    }

    pub fn remove_session(&self, session: &SessionId) {
        self.outbox.sessions.remove(session);
    }

    pub fn session_count(&self) -> usize {
        self.outbox.sessions.len()
    }

    pub async fn submit(&self, cmd: RelayCommand) -> bool {
        match self.relay_tx.send(cmd).await {
            Ok(()) => true,
            Err(e) => {
                error!("Relay loop is gone, dropping {:?}", e.0);
                false
            }
        }
    }
}
