use crate::relay::RelayCommand;
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tandem_core::{ClientEvent, Routing, SessionId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let session = SessionId::new();
    info!("New WebSocket connection: {}", session);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_session(session, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match ClientEvent::from_json(text.as_str()) {
                        Ok(event) => {
                            debug!("{} from {}", event.name(), session);
                            if !service.submit(command_for(session, event)).await {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid frame from {}: {}", session, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.submit(RelayCommand::Leave { session }).await;
    service.remove_session(&session);
    info!("WebSocket disconnected: {}", session);
}

fn command_for(session: SessionId, event: ClientEvent) -> RelayCommand {
    match Routing::from(event) {
        Routing::Join(room) => RelayCommand::Join { session, room },
        Routing::Forward { room, event } => RelayCommand::Forward {
            session,
            room,
            event,
        },
    }
}
