use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tandem_core::{ClientEvent, ServerEvent};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::error::TransportError;
use crate::transport::SignalingTransport;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Relay connection over one WebSocket carrying JSON event frames.
pub struct WsTransport {
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl WsTransport {
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (ws, _) = connect_async(url)
            .await
            .map_err(|source| TransportError::Connect {
                url: url.to_owned(),
                source,
            })?;
        info!("Connected to relay at {}", url);

        let (sink, stream) = ws.split();
        Ok(Self {
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        })
    }
}

#[async_trait]
impl SignalingTransport for WsTransport {
    async fn send(&self, event: ClientEvent) -> Result<(), TransportError> {
        let json = event.to_json()?;
        debug!("WS OUT: {}", event.name());
        self.sink.lock().await.send(Message::Text(json)).await?;
        Ok(())
    }

    async fn recv(&self) -> Option<ServerEvent> {
        let mut stream = self.stream.lock().await;

        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => match ServerEvent::from_json(&text) {
                    Ok(event) => {
                        debug!("WS IN: {}", event.name());
                        return Some(event);
                    }
                    Err(e) => warn!("Invalid frame from relay: {}", e),
                },
                Some(Ok(Message::Close(_))) | None => return None,
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    warn!("Relay connection error: {}", e);
                    return None;
                }
            }
        }
    }

    async fn close(&self) {
        if let Err(e) = self.sink.lock().await.close().await {
            debug!("Closing relay connection: {}", e);
        }
    }
}
