//! Discord Role Gateway
//!
//! A small authenticated HTTP service that adds or removes one role on one
//! member of a configured Discord guild.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ request id / trace / X-Powered-By
//!                        │
//!                        ▼
//!                  X-API-Key check ──── mismatch ───▶ 401 envelope
//!                        │
//!                        ▼
//!                   route match ─────── no match ───▶ 404 envelope
//!                        │
//!                        ▼
//!            fresh Discord session per request
//!            create → open → add/remove → close
//!                        │
//!                        ▼
//!   ◀────────────── {"message": ..., "error": ...}
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use role_gateway::config::{config_warnings, load_config};
use role_gateway::lifecycle::{wait_for_signal, Shutdown};
use role_gateway::observability::init_logging;
use role_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "role-gateway", version)]
#[command(about = "Authenticated HTTP gateway for Discord guild role changes", long_about = None)]
struct Args {
    /// Optional TOML file; API_SECRET, DISCORD_TOKEN and GUILD_ID still apply on top.
    #[arg(short, long, env = "ROLE_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    init_logging(&config.observability)?;

    for warning in config_warnings(&config) {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        guild_id = %config.discord.guild_id,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Role gateway starting");

    let shutdown = Shutdown::new();
    let signal = shutdown.signal();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = GatewayServer::new(config);
    server.run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
