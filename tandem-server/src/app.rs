use crate::config::RelayConfig;
use crate::relay::spawn_relay;
use crate::signaling::{SessionOutbox, SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::http::Method;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Starts the relay loop wired to a fresh [`SignalingService`]. The loop
/// runs until the last clone of the service is dropped.
pub fn start_signaling() -> SignalingService {
    let outbox = SessionOutbox::default();
    let relay_tx = spawn_relay(Arc::new(outbox.clone()));
    SignalingService::new(outbox, relay_tx)
}

/// `/ws` for signaling; every other path is answered from the static bundle,
/// falling back to its `index.html`.
pub fn router(service: SignalingService, static_dir: &Path) -> Router {
    let assets = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/ws", get(ws_handler))
        .fallback_service(assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(config: RelayConfig) -> Result<()> {
    let addr = config.bind_addr().context("Invalid listen address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    serve_on(listener, &config).await
}

/// Serves on an already-bound listener.
pub async fn serve_on(listener: TcpListener, config: &RelayConfig) -> Result<()> {
    let local: SocketAddr = listener.local_addr()?;
    let app = router(start_signaling(), &config.static_dir);

    info!("Signaling relay listening on http://{}", local);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
