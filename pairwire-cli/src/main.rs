use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use colored::*;
use pairwire_client::media::{LogRenderTarget, SampleTracks};
use pairwire_client::{Client, ClientConfig};
use pairwire_core::IceServerConfig;
use pairwire_core::utils::{DEFAULT_SERVER_ADDR, DEFAULT_SIGNALING_URL};
use pairwire_server::ServerConfig;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pairwire")]
#[command(about = "Two-party WebRTC calls over a rendezvous signaling server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the rendezvous server.
    Serve {
        #[arg(long, default_value = DEFAULT_SERVER_ADDR)]
        addr: String,
    },

    /// Create or join a room and negotiate a call.
    #[command(group(ArgGroup::new("room").required(true).args(["create", "join"])))]
    Call {
        #[arg(long, value_name = "ROOM")]
        create: Option<String>,

        #[arg(long, value_name = "ROOM")]
        join: Option<String>,

        #[arg(long, default_value = DEFAULT_SIGNALING_URL)]
        url: String,

        /// STUN server URL; may be repeated. Defaults to a public server.
        #[arg(long)]
        stun: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve { addr } => {
            println!("{}", format!("Starting signaling server on {addr}").green().bold());
            pairwire_server::serve(ServerConfig { addr }).await?;
        }

        Commands::Call {
            create,
            join,
            url,
            stun,
        } => run_call(create, join, url, stun).await?,
    }

    Ok(())
}

async fn run_call(
    create: Option<String>,
    join: Option<String>,
    url: String,
    stun: Vec<String>,
) -> Result<()> {
    let mut config = ClientConfig {
        signaling_url: url,
        ..Default::default()
    };
    if !stun.is_empty() {
        config.ice_servers = stun.into_iter().map(IceServerConfig::stun).collect();
    }

    println!("{}", format!("Connecting to {}", config.signaling_url).cyan());
    let client = match Client::connect(
        config,
        Arc::new(SampleTracks::new("pairwire")),
        Arc::new(LogRenderTarget),
    )
    .await
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", "Failed to connect to server.".red().bold());
            return Err(e).context("Signaling connection failed");
        }
    };

    let mut status = client.status();
    let printer = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let line = status.borrow_and_update().clone();
            println!("{} {}", "status:".yellow().bold(), line);
        }
    });

    let request = match (create, join) {
        (Some(room), _) => client.create_room(&room).await,
        (None, Some(room)) => client.join_room(&room).await,
        (None, None) => anyhow::bail!("Either --create or --join is required"),
    };
    request.context("Room request failed")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Interrupted, leaving call");

    client.leave().await?;
    client.shutdown().await;
    printer.abort();

    println!("{}", "Call ended.".green().bold());
    Ok(())
}
