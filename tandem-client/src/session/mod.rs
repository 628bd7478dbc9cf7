//! Async driver that owns one call: the engine, the relay connection, the
//! peer connection and local capture.

mod peer_worker;

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Context;
use tandem_core::RoomId;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::engine::{Command, EngineEvent, NegotiationEngine, Phase, Role};
use crate::error::{CaptureError, EngineError};
use crate::transport::{
    LocalMedia, MediaSource, PeerConnection, PeerEvent, SignalingTransport, WebRtcPeer,
    WsTransport,
};
use peer_worker::{PeerOp, PeerWorker};

/// Outcome of work running outside the session loop.
pub(crate) enum Completion {
    Engine(EngineEvent),
    Media(Result<LocalMedia, CaptureError>),
}

/// What the presentation layer sees of a call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallSnapshot {
    pub phase: Phase,
    pub role: Option<Role>,
    pub remote_connected: bool,
    pub latest_error: Option<EngineError>,
    pub log: Vec<String>,
}

pub struct CallSession {
    engine: NegotiationEngine,
    transport: Arc<dyn SignalingTransport>,
    peer: Arc<dyn PeerConnection>,
    media: Arc<dyn MediaSource>,
    peer_events: mpsc::UnboundedReceiver<PeerEvent>,
    local_media: Option<LocalMedia>,
    transport_open: bool,
    closed: bool,
}

impl CallSession {
    pub fn new(
        room: RoomId,
        transport: Arc<dyn SignalingTransport>,
        peer: Arc<dyn PeerConnection>,
        peer_events: mpsc::UnboundedReceiver<PeerEvent>,
        media: Arc<dyn MediaSource>,
    ) -> Self {
        Self {
            engine: NegotiationEngine::new(room),
            transport,
            peer,
            media,
            peer_events,
            local_media: None,
            transport_open: true,
            closed: false,
        }
    }

    /// Spawns the session loop. The relay connection must already be open.
    pub fn start(self) -> CallHandle {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(CallSnapshot::default());

        let task = tokio::spawn(self.run(control_rx, snapshot_tx));

        CallHandle {
            control_tx,
            snapshot: snapshot_rx,
            task: Arc::new(tokio::sync::Mutex::new(Some(task))),
        }
    }

    async fn run(
        mut self,
        mut control_rx: mpsc::UnboundedReceiver<()>,
        snapshot_tx: watch::Sender<CallSnapshot>,
    ) {
        info!("Call session started for room {}", self.engine.room());
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let worker = PeerWorker::spawn(self.peer.clone(), done_tx.clone());

        let media_task = tokio::spawn({
            let media = self.media.clone();
            let peer = self.peer.clone();
            let done_tx = done_tx.clone();

            async move {
                let result = match media.acquire().await {
                    Ok(local) => match peer.add_local_media(&local).await {
                        Ok(()) => Ok(local),
                        Err(e) => Err(CaptureError::Attach(e.to_string())),
                    },
                    Err(e) => Err(e),
                };
                let _ = done_tx.send(Completion::Media(result));
            }
        });

        self.dispatch(EngineEvent::TransportConnected, &worker).await;
        publish(&snapshot_tx, &self.engine);

        while !self.closed {
            let event = tokio::select! {
                _ = control_rx.recv() => EngineEvent::Teardown,
                signal = self.transport.recv(), if self.transport_open => match signal {
                    Some(signal) => EngineEvent::Signal(signal),
                    None => {
                        self.transport_open = false;
                        EngineEvent::TransportClosed {
                            reason: "relay closed the connection".to_owned(),
                        }
                    }
                },
                Some(event) = self.peer_events.recv() => event.into(),
                Some(completion) = done_rx.recv() => match completion {
                    Completion::Engine(event) => event,
                    Completion::Media(Ok(local)) => {
                        let info = local.info.clone();
                        self.local_media = Some(local);
                        EngineEvent::MediaAcquired(info)
                    }
                    Completion::Media(Err(e)) => EngineEvent::MediaFailed(e),
                },
            };

            self.dispatch(event, &worker).await;
            publish(&snapshot_tx, &self.engine);
        }

        media_task.abort();
        worker.shutdown();
        info!("Call session for room {} ended", self.engine.room());
    }

    /// Feeds `event` and every follow-up it causes through the engine.
    async fn dispatch(&mut self, event: EngineEvent, worker: &PeerWorker) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            for command in self.engine.step(event) {
                match command {
                    Command::Send(event) => {
                        if !self.transport_open {
                            debug!("Relay connection gone, dropping {}", event.name());
                            continue;
                        }
                        if let Err(e) = self.transport.send(event).await {
                            warn!("Failed to send to relay: {}", e);
                            self.transport_open = false;
                            queue.push_back(EngineEvent::TransportClosed {
                                reason: e.to_string(),
                            });
                        }
                    }
                    Command::CreateOffer => worker.submit(PeerOp::CreateOffer),
                    Command::AcceptOffer(offer) => worker.submit(PeerOp::AcceptOffer(offer)),
                    Command::ApplyAnswer(answer) => worker.submit(PeerOp::ApplyAnswer(answer)),
                    Command::AddRemoteCandidate(candidate) => {
                        worker.submit(PeerOp::AddCandidate(candidate))
                    }
                    Command::Close => self.close(worker).await,
                }
            }
        }
    }

    async fn close(&mut self, worker: &PeerWorker) {
        if self.closed {
            return;
        }
        self.closed = true;

        worker.shutdown();
        if self.transport_open {
            self.transport.close().await;
            self.transport_open = false;
        }
        if let Err(e) = self.peer.close().await {
            warn!("Error closing peer connection: {}", e);
        }
        self.local_media = None;
    }
}

fn publish(snapshot_tx: &watch::Sender<CallSnapshot>, engine: &NegotiationEngine) {
    let state = engine.state();
    snapshot_tx.send_replace(CallSnapshot {
        phase: state.phase,
        role: state.role,
        remote_connected: state.remote_connected,
        latest_error: state.latest_error.clone(),
        log: engine.log().lines(),
    });
}

/// Control side of a running [`CallSession`]. Clones share the same call.
#[derive(Clone)]
pub struct CallHandle {
    control_tx: mpsc::UnboundedSender<()>,
    snapshot: watch::Receiver<CallSnapshot>,
    task: Arc<tokio::sync::Mutex<Option<JoinHandle<()>>>>,
}

impl CallHandle {
    pub fn snapshot(&self) -> CallSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CallSnapshot> {
        self.snapshot.clone()
    }

    /// Resolves with the first snapshot matching `predicate`, or `None` if
    /// the session ended first.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&CallSnapshot) -> bool,
    ) -> Option<CallSnapshot> {
        let mut rx = self.snapshot.clone();
        rx.wait_for(|s| predicate(s)).await.ok().map(|s| s.clone())
    }

    /// Ends the call and waits for the session to release everything.
    /// Safe to call any number of times.
    pub async fn teardown(&self) {
        let _ = self.control_tx.send(());

        let task = self.task.lock().await.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!("Call session task failed: {}", e);
            }
        }
    }
}

/// Connects to the relay and starts a call with a native peer connection.
pub async fn start_call(
    config: EngineConfig,
    media: Arc<dyn MediaSource>,
) -> anyhow::Result<CallHandle> {
    let transport = WsTransport::connect(&config.signaling_url()).await?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let peer = WebRtcPeer::new(&config.ice_servers, event_tx)
        .await
        .context("Failed to set up peer connection")?;

    Ok(CallSession::new(
        config.room,
        Arc::new(transport),
        Arc::new(peer),
        event_rx,
        media,
    )
    .start())
}
