use tandem_core::ProtocolError;
use thiserror::Error;

/// Why local camera/microphone capture could not be obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    /// Another application holds the device.
    #[error("capture device busy: {0}")]
    DeviceBusy(String),

    #[error("capture permission denied: {0}")]
    PermissionDenied(String),

    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    /// Tracks were captured but could not be attached to the connection.
    #[error("failed to attach local tracks: {0}")]
    Attach(String),
}

/// User-facing failure surfaced as the call's latest error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(
        "Unable to access your camera or microphone. Please ensure no other application is using them and try again."
    )]
    CaptureBusy,

    #[error(
        "An error occurred while trying to access your camera and microphone. Please check your permissions and try again."
    )]
    CaptureFailed,

    #[error("An error occurred while trying to initiate the call. Please try again.")]
    InitiateCall,

    #[error("An error occurred while trying to connect to the remote user. Please try again.")]
    ConnectRemote,

    #[error("An error occurred while trying to establish the connection. Please try again.")]
    EstablishConnection,

    #[error("Lost connection to the signaling server.")]
    SignalingLost,
}

impl From<&CaptureError> for EngineError {
    fn from(err: &CaptureError) -> Self {
        match err {
            CaptureError::DeviceBusy(_) => EngineError::CaptureBusy,
            _ => EngineError::CaptureFailed,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("signaling transport closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum PeerError {
    #[error(transparent)]
    WebRtc(#[from] webrtc::Error),

    #[error("peer connection closed")]
    Closed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
