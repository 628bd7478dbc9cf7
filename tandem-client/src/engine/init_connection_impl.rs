use crate::engine::{Command, MediaInfo, NegotiationEngine, Phase};
use crate::error::{CaptureError, EngineError};

impl NegotiationEngine {
    pub(super) fn on_transport_connected(&mut self) -> Vec<Command> {
        self.log.info("Connected to signaling server");
        self.state.transport_connected = true;
        self.try_join()
    }

    pub(super) fn on_media_acquired(&mut self, info: MediaInfo) -> Vec<Command> {
        self.log.info(format!(
            "Local media ready (stream {}, audio: {}, video: {})",
            info.stream_id, info.audio, info.video
        ));
        self.state.media = Some(info);
        self.try_join()
    }

    /// Capture is mandatory, so the room is never joined after this.
    pub(super) fn on_media_failed(&mut self, err: CaptureError) -> Vec<Command> {
        self.state.media_failed = true;
        self.log.error(format!("Error accessing media devices: {}", err));
        self.fail(EngineError::from(&err));
        Vec::new()
    }

    pub(super) fn on_transport_closed(&mut self, reason: String) -> Vec<Command> {
        self.state.transport_connected = false;

        if self.state.phase == Phase::Connected {
            self.log.warn(format!("Signaling connection closed: {}", reason));
            return Vec::new();
        }

        self.log.error(format!("Signaling connection lost: {}", reason));
        self.fail(EngineError::SignalingLost);
        Vec::new()
    }
}
