use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    #[error("malformed {what}: {source}")]
    MalformedPayload {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a session description of type {expected}, got {actual}")]
    UnexpectedSdpType {
        expected: &'static str,
        actual: &'static str,
    },
}
