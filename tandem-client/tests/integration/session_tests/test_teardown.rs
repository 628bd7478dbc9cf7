use tandem_client::Phase;
use tandem_core::ServerEvent;

use super::start;
use crate::integration::{init_tracing, wait_for_phase};
use crate::utils::FakeMedia;

#[tokio::test]
async fn test_teardown_is_idempotent() {
    init_tracing();
    let h = start("abc", FakeMedia::working());
    wait_for_phase(&h.handle, Phase::WaitingForPeer).await;

    let other = h.handle.clone();
    h.handle.teardown().await;
    h.handle.teardown().await;
    other.teardown().await;

    assert_eq!(h.handle.snapshot().phase, Phase::Closed);
    assert_eq!(h.transport.close_count(), 1);
    assert_eq!(h.peer.close_count(), 1);
}

#[tokio::test]
async fn test_no_processing_after_teardown() {
    init_tracing();
    let h = start("abc", FakeMedia::working());
    wait_for_phase(&h.handle, Phase::WaitingForPeer).await;

    h.handle.teardown().await;
    let _ = h.relay.send(ServerEvent::UserConnected);
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    assert!(!h.peer.calls().contains(&"create_offer"));
    assert_eq!(h.transport.sent_names(), vec!["join-room"]);
}

#[tokio::test]
async fn test_teardown_before_join() {
    init_tracing();
    let h = start(
        "abc",
        FakeMedia::failing(tandem_client::CaptureError::Unavailable("none".into())),
    );
    wait_for_phase(&h.handle, Phase::Error).await;

    h.handle.teardown().await;
    assert_eq!(h.handle.snapshot().phase, Phase::Closed);
    assert_eq!(h.transport.close_count(), 1);
    assert_eq!(h.peer.close_count(), 1);
}
