use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use webrtc::track::track_local::TrackLocal;

use crate::engine::MediaInfo;

/// Captured local stream. Dropping it releases capture and stops any
/// background sample writer.
pub struct LocalMedia {
    pub info: MediaInfo,
    pub tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>,
    pump: Option<JoinHandle<()>>,
}

impl LocalMedia {
    pub fn new(info: MediaInfo, tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>) -> Self {
        Self {
            info,
            tracks,
            pump: None,
        }
    }

    pub(crate) fn with_pump(mut self, pump: JoinHandle<()>) -> Self {
        self.pump = Some(pump);
        self
    }
}

impl fmt::Debug for LocalMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalMedia")
            .field("info", &self.info)
            .field("tracks", &self.tracks.len())
            .field("pumping", &self.pump.is_some())
            .finish()
    }
}

impl Drop for LocalMedia {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
    }
}
