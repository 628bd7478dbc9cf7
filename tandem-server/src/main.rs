use clap::Parser;
use tandem_server::RelayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tandem_server=info,tower_http=info".into()),
        )
        .init();

    let config = RelayConfig::parse();
    tandem_server::serve(config).await
}
