use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use siprelay_server::commands::SlashCommand;
use siprelay_server::logging::{self, LoggingConfig};
use siprelay_server::{
    create_router, resolve_target, AppState, ChannelNotifier, MattermostClient, RelayConfig,
};

/// Relay SIP endpoint status changes into a chat channel
#[derive(Debug, Parser)]
#[command(name = "siprelay", version, about)]
struct Args {
    /// Configuration file (defaults to ./siprelay.toml when present)
    #[arg(short, long, env = "SIPRELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Log as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = RelayConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if args.json_logs {
        config.logging.json = true;
    }

    logging::setup_logging(LoggingConfig::from_settings(&config.logging)?)?;
    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let client = MattermostClient::new(&config.host)?;
    let target = resolve_target(&client, &config)
        .await
        .context("failed to resolve chat target")?;
    let notifier = Arc::new(ChannelNotifier::new(client, target));

    let state = AppState::from_config(&config, notifier);
    info!(
        aliases = state.interpreter.aliases().len(),
        hide_connection_messages = config.hide_connection_messages,
        "status relay ready"
    );
    for command in SlashCommand::ALL {
        info!(trigger = command.trigger(), description = command.description(), "slash command available");
    }

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // without a signal handler we run until killed
        std::future::pending::<()>().await;
    }
}
