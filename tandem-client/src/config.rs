use tandem_core::RoomId;
use tandem_core::utils::IceServerConfig;

/// Everything a call needs to know before it starts.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Relay address; `http(s)://host` and `ws(s)://host` are both accepted.
    pub server_url: String,
    pub room: RoomId,
    pub ice_servers: Vec<IceServerConfig>,
}

impl EngineConfig {
    pub fn new(server_url: impl Into<String>, room: impl Into<RoomId>) -> Self {
        Self {
            server_url: server_url.into(),
            room: room.into(),
            ice_servers: IceServerConfig::default_stun(),
        }
    }

    pub fn with_ice_servers(mut self, ice_servers: Vec<IceServerConfig>) -> Self {
        self.ice_servers = ice_servers;
        self
    }

    /// WebSocket endpoint of the relay, ending in `/ws`.
    pub fn signaling_url(&self) -> String {
        let base = self.server_url.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else if base.starts_with("ws://") || base.starts_with("wss://") {
            base.to_owned()
        } else {
            format!("ws://{}", base)
        };

        if base.ends_with("/ws") {
            base
        } else {
            format!("{}/ws", base)
        }
    }
}
