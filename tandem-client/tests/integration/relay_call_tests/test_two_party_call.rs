use std::time::Duration;
use tandem_client::{Phase, Role};

use crate::integration::{SETTLE_MS, init_tracing, join_via_relay, spawn_relay, wait_for_phase};

#[tokio::test]
async fn test_two_clients_connect_through_relay() {
    init_tracing();
    let addr = spawn_relay().await;

    let (a, peer_a) = join_via_relay(addr, "abc", "a").await;
    wait_for_phase(&a, Phase::WaitingForPeer).await;
    tokio::time::sleep(Duration::from_millis(SETTLE_MS)).await;

    let (b, peer_b) = join_via_relay(addr, "abc", "b").await;

    let snap_a = wait_for_phase(&a, Phase::Connected).await;
    let snap_b = wait_for_phase(&b, Phase::Connected).await;

    assert_eq!(snap_a.role, Some(Role::Caller));
    assert_eq!(snap_b.role, Some(Role::Callee));
    assert!(snap_a.latest_error.is_none());
    assert!(snap_b.latest_error.is_none());

    assert!(peer_a.calls().contains(&"create_offer"));
    assert!(peer_a.calls().contains(&"apply_answer"));
    assert!(!peer_b.calls().contains(&"create_offer"));
    assert!(peer_b.calls().contains(&"accept_offer"));

    // Each side gathered one candidate and the other applied it.
    tokio::time::sleep(Duration::from_millis(SETTLE_MS)).await;
    assert!(
        peer_b
            .remote_candidates()
            .iter()
            .any(|c| c.candidate.starts_with("candidate:a"))
    );
    assert!(
        peer_a
            .remote_candidates()
            .iter()
            .any(|c| c.candidate.starts_with("candidate:b"))
    );

    a.teardown().await;
    b.teardown().await;
}
