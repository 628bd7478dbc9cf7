use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tandem_server::{router, start_signaling};
use tower::ServiceExt;

use super::static_bundle;
use crate::integration::init_tracing;

async fn get(path: &str, dir: &std::path::Path) -> (StatusCode, String) {
    let app = router(start_signaling(), dir);
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn test_existing_asset_is_served() {
    init_tracing();
    let dir = static_bundle("asset");

    let (status, body) = get("/assets/app.js", &dir).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("tandem"));
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_index() {
    init_tracing();
    let dir = static_bundle("fallback");

    let (status, body) = get("/call/5f0c6a4e-room", &dir).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>tandem</title>"));
}
