use tandem_core::ServerEvent;

use super::static_bundle;
use crate::integration::{init_tracing, spawn_test_server};
use crate::utils::WsTestClient;

#[tokio::test]
async fn test_malformed_frames_do_not_drop_the_connection() {
    init_tracing();

    let addr = spawn_test_server(static_bundle("malformed")).await;
    let mut a = WsTestClient::connect(addr).await.unwrap();
    let mut b = WsTestClient::connect(addr).await.unwrap();

    a.send_raw("not json at all").await.unwrap();
    a.send_raw(r#"{"event":"check-room","data":"abc"}"#).await.unwrap();
    a.send_raw(r#"{"event":"offer","data":{"room":"abc"}}"#).await.unwrap();

    a.join("abc").await.unwrap();
    b.join("abc").await.unwrap();

    assert_eq!(a.recv().await.unwrap(), ServerEvent::UserConnected);
}
