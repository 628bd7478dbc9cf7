use serde_json::json;
use tandem_core::{Payload, RoomId, ServerEvent, SessionId};
use tandem_server::RelayCommand;

use super::{assert_quiet, next_delivery};
use crate::integration::{create_test_relay, init_tracing};

#[tokio::test]
async fn test_forward_reaches_other_occupant_only() {
    init_tracing();

    let (relay_tx, mut delivery_rx, signaling) = create_test_relay();
    let room = RoomId::from("abc");
    let a = SessionId::new();
    let b = SessionId::new();

    for session in [a, b] {
        relay_tx
            .send(RelayCommand::Join {
                session,
                room: room.clone(),
            })
            .await
            .unwrap();
    }
    next_delivery(&mut delivery_rx).await; // user-connected for a

    let offer = ServerEvent::Offer(Payload(json!({"type": "offer", "sdp": "v=0"})));
    relay_tx
        .send(RelayCommand::Forward {
            session: a,
            room: room.clone(),
            event: offer.clone(),
        })
        .await
        .unwrap();

    let delivery = next_delivery(&mut delivery_rx).await;
    assert_eq!(delivery.session, b);
    assert_eq!(delivery.event, offer);

    assert_quiet(&mut delivery_rx).await;
    assert_eq!(signaling.delivered_to(&a).await, vec![ServerEvent::UserConnected]);
}

#[tokio::test]
async fn test_forward_preserves_sender_order() {
    init_tracing();

    let (relay_tx, mut delivery_rx, _signaling) = create_test_relay();
    let room = RoomId::from("ordered");
    let a = SessionId::new();
    let b = SessionId::new();

    for session in [a, b] {
        relay_tx
            .send(RelayCommand::Join {
                session,
                room: room.clone(),
            })
            .await
            .unwrap();
    }
    next_delivery(&mut delivery_rx).await;

    for i in 0..10 {
        relay_tx
            .send(RelayCommand::Forward {
                session: b,
                room: room.clone(),
                event: ServerEvent::IceCandidate(Payload(json!({"candidate": i.to_string()}))),
            })
            .await
            .unwrap();
    }

    for i in 0..10 {
        let delivery = next_delivery(&mut delivery_rx).await;
        assert_eq!(delivery.session, a);
        assert_eq!(
            delivery.event,
            ServerEvent::IceCandidate(Payload(json!({"candidate": i.to_string()})))
        );
    }
}

#[tokio::test]
async fn test_non_member_sender_is_not_validated() {
    init_tracing();

    let (relay_tx, mut delivery_rx, _signaling) = create_test_relay();
    let room = RoomId::from("abc");
    let member = SessionId::new();

    relay_tx
        .send(RelayCommand::Join {
            session: member,
            room: room.clone(),
        })
        .await
        .unwrap();
    relay_tx
        .send(RelayCommand::Forward {
            session: SessionId::new(),
            room,
            event: ServerEvent::Answer(Payload(json!({"type": "answer", "sdp": "v=0"}))),
        })
        .await
        .unwrap();

    let delivery = next_delivery(&mut delivery_rx).await;
    assert_eq!(delivery.session, member);
}
