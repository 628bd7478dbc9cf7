use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::utils::IceServerConfig;
use tandem_core::{IceCandidate, SessionDescription};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_connection_state::RTCIceConnectionState;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_remote::TrackRemote;

use crate::error::PeerError;
use crate::transport::{LocalMedia, PeerConnection, PeerEvent};

/// [`PeerConnection`] backed by a native `webrtc` peer connection.
pub struct WebRtcPeer {
    peer_connection: Arc<RTCPeerConnection>,
    /// Remote candidates received before any remote description.
    pending_candidates: Mutex<Vec<RTCIceCandidateInit>>,
    event_tx: mpsc::UnboundedSender<PeerEvent>,
}

impl WebRtcPeer {
    /// Builds the connection and wires its callbacks into `event_tx`.
    pub async fn new(
        ice_servers: &[IceServerConfig],
        event_tx: mpsc::UnboundedSender<PeerEvent>,
    ) -> Result<Self, PeerError> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );

        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let init = match candidate.to_json() {
                    Ok(init) => init,
                    Err(e) => {
                        warn!("Failed to serialize local ICE candidate: {}", e);
                        return;
                    }
                };
                let _ = tx.send(PeerEvent::LocalCandidate(IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                    username_fragment: init.username_fragment,
                }));
            })
        }));

        let state_tx = event_tx.clone();
        peer_connection.on_ice_connection_state_change(Box::new(
            move |s: RTCIceConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    let _ = tx.send(PeerEvent::IceStateChanged(s.to_string()));
                })
            },
        ));

        let track_tx = event_tx.clone();
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();

                Box::pin(async move {
                    let kind = track.kind().to_string();
                    info!("Remote {} track started (ssrc {})", kind, track.ssrc());
                    let _ = tx.send(PeerEvent::RemoteTrack { kind });

                    // Nothing renders the remote stream; keep its buffers drained.
                    tokio::spawn(async move { while track.read_rtp().await.is_ok() {} });
                })
            },
        ));

        Ok(Self {
            peer_connection,
            pending_candidates: Mutex::new(Vec::new()),
            event_tx,
        })
    }

    /// Buffered candidates that fail are reported as
    /// [`PeerEvent::CandidateRejected`]; the description itself still stands.
    async fn set_remote(&self, desc: RTCSessionDescription) -> Result<(), PeerError> {
        self.peer_connection.set_remote_description(desc).await?;

        let mut pending = self.pending_candidates.lock().await;
        if !pending.is_empty() {
            debug!("Applying {} buffered ICE candidates", pending.len());
        }
        for init in pending.drain(..) {
            if let Err(e) = self.peer_connection.add_ice_candidate(init).await {
                warn!("Error adding buffered ICE candidate: {}", e);
                let _ = self
                    .event_tx
                    .send(PeerEvent::CandidateRejected(e.to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PeerConnection for WebRtcPeer {
    async fn add_local_media(&self, media: &LocalMedia) -> Result<(), PeerError> {
        for track in &media.tracks {
            let sender = self.peer_connection.add_track(Arc::clone(track)).await?;

            // RTCP has to be read for interceptors like NACK to work.
            tokio::spawn(async move {
                let mut buf = vec![0u8; 1500];
                while sender.read(&mut buf).await.is_ok() {}
            });
        }
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription, PeerError> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn accept_offer(
        &self,
        offer: SessionDescription,
    ) -> Result<SessionDescription, PeerError> {
        self.set_remote(RTCSessionDescription::offer(offer.sdp)?)
            .await?;

        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn apply_answer(&self, answer: SessionDescription) -> Result<(), PeerError> {
        self.set_remote(RTCSessionDescription::answer(answer.sdp)?)
            .await
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: candidate.username_fragment,
        };

        let mut pending = self.pending_candidates.lock().await;
        if self.peer_connection.remote_description().await.is_none() {
            debug!("Buffering ICE candidate until a remote description is set");
            pending.push(init);
            return Ok(());
        }
        drop(pending);

        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), PeerError> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
