pub mod test_forward_reaches_others_only;
pub mod test_join_notifies_existing;
pub mod test_lonely_room;

use std::time::Duration;
use tokio::sync::mpsc;

use crate::utils::Delivery;

/// Timeout for an expected delivery (ms).
pub const DELIVERY_TIMEOUT_MS: u64 = 2000;

/// Time after which the relay loop is assumed idle (ms).
pub const QUIET_MS: u64 = 200;

pub async fn next_delivery(rx: &mut mpsc::UnboundedReceiver<Delivery>) -> Delivery {
    tokio::time::timeout(Duration::from_millis(DELIVERY_TIMEOUT_MS), rx.recv())
        .await
        .expect("Timeout waiting for delivery")
        .expect("Delivery channel closed")
}

pub async fn assert_quiet(rx: &mut mpsc::UnboundedReceiver<Delivery>) {
    if let Ok(Some(d)) = tokio::time::timeout(Duration::from_millis(QUIET_MS), rx.recv()).await {
        panic!("Unexpected delivery: {:?}", d);
    }
}
