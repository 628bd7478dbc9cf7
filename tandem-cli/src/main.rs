use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use tandem_client::{CallSnapshot, EngineConfig, Phase, SyntheticMedia, start_call};
use tandem_core::utils::IceServerConfig;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tandem", version, about = "Two-party calls over a tandem relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join a room as a native participant with synthetic media
    Call {
        /// Relay address
        #[arg(short, long, default_value = "http://localhost:3001", env = "TANDEM_SERVER")]
        server: String,

        /// Room to join
        #[arg(short, long)]
        room: String,

        /// STUN/TURN url; may be repeated (defaults to public STUN servers)
        #[arg(long = "ice")]
        ice: Vec<String>,

        /// Do not send silence on the audio track
        #[arg(long)]
        no_silence: bool,
    },

    /// Print a fresh shareable call link
    Link {
        /// Base URL of the call UI
        #[arg(short, long, default_value = "http://localhost:3001", env = "TANDEM_BASE_URL")]
        base: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tandem_client=info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Call {
            server,
            room,
            ice,
            no_silence,
        } => run_call(server, room, ice, no_silence).await,
        Commands::Link { base } => {
            println!("{}", call_link(&base, Uuid::new_v4()));
            Ok(())
        }
    }
}

async fn run_call(server: String, room: String, ice: Vec<String>, no_silence: bool) -> Result<()> {
    let mut config = EngineConfig::new(server, room.as_str());
    if !ice.is_empty() {
        config = config.with_ice_servers(
            ice.into_iter()
                .map(|url| IceServerConfig {
                    urls: vec![url],
                    username: None,
                    credential: None,
                })
                .collect(),
        );
    }

    println!(
        "{} {} via {}",
        "📞 Joining room".green().bold(),
        room.bold(),
        config.signaling_url()
    );

    let media = SyntheticMedia::new().with_silence(!no_silence);
    let call = start_call(config, Arc::new(media))
        .await
        .context("Failed to start call")?;

    let mut updates = call.subscribe();
    let mut last_phase = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if last_phase != Some(snapshot.phase) {
                    report(&snapshot);
                    last_phase = Some(snapshot.phase);
                }
            }
        }
    }

    call.teardown().await;

    println!("{}", "Connection log:".cyan());
    for line in call.snapshot().log {
        println!("   {}", line);
    }
    Ok(())
}

fn report(snapshot: &CallSnapshot) {
    let phase = snapshot.phase.to_string();
    let phase = match snapshot.phase {
        Phase::Connected => phase.green().bold(),
        Phase::Error => phase.red().bold(),
        Phase::Closed => phase.dimmed(),
        _ => phase.yellow(),
    };
    match &snapshot.latest_error {
        Some(err) => println!("   {} ({})", phase, err.to_string().red()),
        None => println!("   {}", phase),
    }
}

/// Shareable link for a new call: `<base>/call/<id>`.
fn call_link(base: &str, id: Uuid) -> String {
    format!("{}/call/{}", base.trim_end_matches('/'), id)
}
