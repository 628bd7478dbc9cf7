//! Integration tests for tandem_client.
//!
//! - `session_tests` - one `CallSession` against an in-memory relay connection
//! - `relay_call_tests` - two sessions talking through a real relay

pub mod relay_call_tests;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tandem_client::{CallHandle, CallSession, CallSnapshot, Phase, WsTransport};
use tandem_core::RoomId;
use tandem_server::RelayConfig;
use tokio::net::TcpListener;
use tracing::Level;

use crate::utils::{FakeMedia, FakePeer};

/// Timeout for a call to reach an expected state (ms).
pub const PHASE_TIMEOUT_MS: u64 = 5000;

/// Time given to the relay loop to register a join (ms).
pub const SETTLE_MS: u64 = 150;

/// Initialize tracing for tests (call once per test).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Start a relay on an ephemeral local port.
pub async fn spawn_relay() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    let config = RelayConfig {
        port: addr.port(),
        host: "127.0.0.1".to_owned(),
        static_dir: PathBuf::from("dist"),
    };

    tokio::spawn(async move {
        let _ = tandem_server::serve_on(listener, &config).await;
    });

    addr
}

/// Start a call in `room` over a real relay connection with a fake peer and
/// working capture.
pub async fn join_via_relay(
    addr: SocketAddr,
    room: &str,
    label: &str,
) -> (CallHandle, Arc<FakePeer>) {
    let transport = WsTransport::connect(&format!("ws://{}/ws", addr))
        .await
        .expect("Failed to connect to relay");
    let (peer, peer_events) = FakePeer::new(label);

    let handle = CallSession::new(
        RoomId::from(room),
        Arc::new(transport),
        peer.clone(),
        peer_events,
        Arc::new(FakeMedia::working()),
    )
    .start();

    (handle, peer)
}

pub async fn wait_for_phase(handle: &CallHandle, phase: Phase) -> CallSnapshot {
    tokio::time::timeout(
        Duration::from_millis(PHASE_TIMEOUT_MS),
        handle.wait_for(|s| s.phase == phase),
    )
    .await
    .unwrap_or_else(|_| panic!("Timeout waiting for {}: {:?}", phase, handle.snapshot()))
    .expect("Call session ended early")
}
