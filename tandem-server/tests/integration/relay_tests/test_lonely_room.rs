use serde_json::json;
use tandem_core::{Payload, RoomId, ServerEvent, SessionId};
use tandem_server::RelayCommand;

use super::assert_quiet;
use crate::integration::{create_test_relay, init_tracing};

#[tokio::test]
async fn test_forward_to_single_occupant_room_is_dropped() {
    init_tracing();

    let (relay_tx, mut delivery_rx, signaling) = create_test_relay();
    let room = RoomId::from("x");
    let a = SessionId::new();

    relay_tx
        .send(RelayCommand::Join {
            session: a,
            room: room.clone(),
        })
        .await
        .unwrap();
    relay_tx
        .send(RelayCommand::Forward {
            session: a,
            room,
            event: ServerEvent::Offer(Payload(json!({"type": "offer", "sdp": "v=0"}))),
        })
        .await
        .unwrap();

    assert_quiet(&mut delivery_rx).await;
    assert_eq!(signaling.total().await, 0);
}

#[tokio::test]
async fn test_forward_to_unknown_room_is_dropped() {
    init_tracing();

    let (relay_tx, mut delivery_rx, _signaling) = create_test_relay();

    relay_tx
        .send(RelayCommand::Forward {
            session: SessionId::new(),
            room: RoomId::from("nobody-home"),
            event: ServerEvent::IceCandidate(Payload(json!({"candidate": ""}))),
        })
        .await
        .unwrap();

    assert_quiet(&mut delivery_rx).await;
}
