use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

use crate::engine::MediaInfo;
use crate::error::CaptureError;
use crate::transport::{LocalMedia, MediaSource};

/// One 20 ms Opus frame of silence.
const OPUS_SILENCE: &[u8] = &[0xf8, 0xff, 0xfe];
const FRAME: Duration = Duration::from_millis(20);

/// Capture stand-in for hosts without a camera: an Opus audio track and a
/// VP8 video track, optionally fed with silence so the remote side sees an
/// inbound track.
#[derive(Debug, Clone)]
pub struct SyntheticMedia {
    audio: bool,
    video: bool,
    pump_silence: bool,
}

impl Default for SyntheticMedia {
    fn default() -> Self {
        Self {
            audio: true,
            video: true,
            pump_silence: true,
        }
    }
}

impl SyntheticMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(mut self, audio: bool) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_video(mut self, video: bool) -> Self {
        self.video = video;
        self
    }

    pub fn with_silence(mut self, pump_silence: bool) -> Self {
        self.pump_silence = pump_silence;
        self
    }
}

#[async_trait]
impl MediaSource for SyntheticMedia {
    async fn acquire(&self) -> Result<LocalMedia, CaptureError> {
        // Calls need both devices; there is no audio-only fallback.
        if !self.audio || !self.video {
            let missing = if self.audio { "camera" } else { "microphone" };
            return Err(CaptureError::Unavailable(format!("no {} found", missing)));
        }

        let stream_id = Uuid::new_v4().to_string();
        let audio = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                clock_rate: 48000,
                channels: 2,
                ..Default::default()
            },
            "audio".to_owned(),
            stream_id.clone(),
        ));
        let video = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                clock_rate: 90000,
                ..Default::default()
            },
            "video".to_owned(),
            stream_id.clone(),
        ));
        info!("Synthetic capture started (stream {})", stream_id);

        let info = MediaInfo {
            stream_id,
            audio: true,
            video: true,
        };
        let tracks: Vec<Arc<dyn TrackLocal + Send + Sync>> = vec![audio.clone(), video];
        let media = LocalMedia::new(info, tracks);

        if !self.pump_silence {
            return Ok(media);
        }

        let pump = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(FRAME);
            loop {
                ticker.tick().await;
                let sample = Sample {
                    data: Bytes::from_static(OPUS_SILENCE),
                    duration: FRAME,
                    ..Default::default()
                };
                if let Err(e) = audio.write_sample(&sample).await {
                    debug!("Silence pump stopped: {}", e);
                    break;
                }
            }
        });
        Ok(media.with_pump(pump))
    }
}
