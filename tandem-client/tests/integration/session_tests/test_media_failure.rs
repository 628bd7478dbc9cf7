use tandem_client::{CaptureError, EngineError, Phase};
use tandem_core::{IceCandidate, ServerEvent, SessionDescription};

use super::{eventually, start, start_with_peer};
use crate::integration::{init_tracing, wait_for_phase};
use crate::utils::{FakeMedia, FakePeer};

#[tokio::test]
async fn test_busy_device_stops_before_join() {
    init_tracing();
    let h = start(
        "abc",
        FakeMedia::failing(CaptureError::DeviceBusy("camera in use".into())),
    );

    let snapshot = wait_for_phase(&h.handle, Phase::Error).await;
    assert_eq!(snapshot.latest_error, Some(EngineError::CaptureBusy));
    assert!(
        snapshot
            .log
            .iter()
            .any(|l| l.contains("Error accessing media devices"))
    );
    assert!(h.transport.sent().is_empty());
    assert!(!h.peer.calls().contains(&"add_local_media"));

    // Nothing is negotiated without a join.
    h.relay.send(ServerEvent::UserConnected).unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(h.peer.calls().is_empty());
    assert!(h.transport.sent().is_empty());

    h.handle.teardown().await;
}

#[tokio::test]
async fn test_denied_permission_uses_generic_message() {
    init_tracing();
    let h = start(
        "abc",
        FakeMedia::failing(CaptureError::PermissionDenied("blocked".into())),
    );

    let snapshot = wait_for_phase(&h.handle, Phase::Error).await;
    assert_eq!(snapshot.latest_error, Some(EngineError::CaptureFailed));
    assert!(
        snapshot
            .latest_error
            .unwrap()
            .to_string()
            .contains("check your permissions")
    );

    h.handle.teardown().await;
}

#[tokio::test]
async fn test_rejected_offer_is_not_fatal() {
    init_tracing();
    let h = start_with_peer("abc", FakeMedia::working(), FakePeer::rejecting("local"));
    wait_for_phase(&h.handle, Phase::WaitingForPeer).await;

    h.relay
        .send(ServerEvent::Offer(
            SessionDescription::offer("v=0 garbage").to_payload(),
        ))
        .unwrap();

    let snapshot = wait_for_phase(&h.handle, Phase::Error).await;
    assert_eq!(snapshot.latest_error, Some(EngineError::ConnectRemote));
    assert!(!h.transport.sent_names().contains(&"answer"));

    // Later frames are still processed.
    let candidate = IceCandidate {
        candidate: "candidate:late 1 udp 1 10.0.0.3 7000 typ host".to_owned(),
        sdp_mid: None,
        sdp_m_line_index: Some(0),
        username_fragment: None,
    };
    h.relay
        .send(ServerEvent::IceCandidate(candidate.to_payload().unwrap()))
        .unwrap();
    eventually("late candidate", || {
        h.peer.remote_candidates().contains(&candidate)
    })
    .await;

    h.handle.teardown().await;
}
