use async_trait::async_trait;
use tandem_core::{ServerEvent, SessionId};

/// Outbound side of the relay: how an event reaches one connected session.
///
/// Implementations must not wait on the receiver; a stalled connection may
/// never hold up delivery to anybody else.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn deliver(&self, session: &SessionId, event: ServerEvent);
}
