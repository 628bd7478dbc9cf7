use tandem_core::{RoomId, ServerEvent, SessionId};
use tandem_server::RelayCommand;

use super::{assert_quiet, next_delivery};
use crate::integration::{create_test_relay, init_tracing};

#[tokio::test]
async fn test_second_join_notifies_first_occupant_once() {
    init_tracing();

    let (relay_tx, mut delivery_rx, signaling) = create_test_relay();
    let room = RoomId::from("abc");
    let a = SessionId::new();
    let b = SessionId::new();

    relay_tx
        .send(RelayCommand::Join {
            session: a,
            room: room.clone(),
        })
        .await
        .unwrap();
    relay_tx
        .send(RelayCommand::Join {
            session: b,
            room: room.clone(),
        })
        .await
        .unwrap();

    let delivery = next_delivery(&mut delivery_rx).await;
    assert_eq!(delivery.session, a);
    assert_eq!(delivery.event, ServerEvent::UserConnected);

    assert_quiet(&mut delivery_rx).await;
    assert!(signaling.delivered_to(&b).await.is_empty());
}

#[tokio::test]
async fn test_join_in_other_room_is_isolated() {
    init_tracing();

    let (relay_tx, mut delivery_rx, _signaling) = create_test_relay();

    relay_tx
        .send(RelayCommand::Join {
            session: SessionId::new(),
            room: RoomId::from("one"),
        })
        .await
        .unwrap();
    relay_tx
        .send(RelayCommand::Join {
            session: SessionId::new(),
            room: RoomId::from("two"),
        })
        .await
        .unwrap();

    assert_quiet(&mut delivery_rx).await;
}

#[tokio::test]
async fn test_third_occupant_notifies_both() {
    init_tracing();

    let (relay_tx, mut delivery_rx, signaling) = create_test_relay();
    let room = RoomId::from("crowded");
    let sessions = [SessionId::new(), SessionId::new(), SessionId::new()];

    for session in sessions {
        relay_tx
            .send(RelayCommand::Join {
                session,
                room: room.clone(),
            })
            .await
            .unwrap();
    }

    // 1 delivery for the second join, 2 for the third.
    for _ in 0..3 {
        next_delivery(&mut delivery_rx).await;
    }
    assert_quiet(&mut delivery_rx).await;

    assert_eq!(signaling.delivered_to(&sessions[0]).await.len(), 2);
    assert_eq!(signaling.delivered_to(&sessions[1]).await.len(), 1);
    assert!(signaling.delivered_to(&sessions[2]).await.is_empty());
}
