use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3001;

/// Relay process configuration. Every flag can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "tandem-relay", version, about = "Room-scoped WebRTC signaling relay")]
pub struct RelayConfig {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Directory holding the compiled UI bundle
    #[arg(long, default_value = "dist", env = "STATIC_DIR")]
    pub static_dir: PathBuf,
}

impl RelayConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_owned(),
            static_dir: PathBuf::from("dist"),
        }
    }
}
