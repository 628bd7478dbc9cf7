use crate::relay::{RelayCommand, RoomRegistry};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::{RoomId, ServerEvent, SessionId};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Single event loop owning all room membership.
///
/// Commands are processed one at a time, so membership changes are
/// serialized without locking. Fan-out goes through [`SignalingOutput`],
/// whose implementations queue and return immediately.
pub struct Relay {
    rooms: RoomRegistry,
    command_rx: mpsc::Receiver<RelayCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Relay event loop finished");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Join { session, room } => self.join(session, room).await,

            RelayCommand::Forward {
                session,
                room,
                event,
            } => self.forward(session, room, event).await,

            RelayCommand::Leave { session } => {
                let left = self.rooms.leave(&session);
                if !left.is_empty() {
                    info!("Session {} left {} room(s)", session, left.len());
                }
            }
        }
    }

    async fn join(&mut self, session: SessionId, room: RoomId) {
        info!("Session {} joined room: {}", session, room);

        for occupant in self.rooms.join(&room, session) {
            self.signaling
                .deliver(&occupant, ServerEvent::UserConnected)
                .await;
        }
    }

    async fn forward(&mut self, session: SessionId, room: RoomId, event: ServerEvent) {
        let recipients = self.rooms.recipients(&room, &session);
        debug!(
            "{} from {} for room {} -> {} recipient(s)",
            event.name(),
            session,
            room,
            recipients.len()
        );

        for occupant in &recipients {
            self.signaling.deliver(occupant, event.clone()).await;
        }
    }
}

/// Spawns a relay loop and returns the sender that feeds it.
pub fn spawn_relay(signaling: Arc<dyn SignalingOutput>) -> mpsc::Sender<RelayCommand> {
    let (tx, rx) = mpsc::channel(256);
    tokio::spawn(Relay::new(rx, signaling).run());
    tx
}
