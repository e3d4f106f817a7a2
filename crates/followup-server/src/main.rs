//! followup server - HTTP API for the Drive-backed follow-up tracker.

use anyhow::Result;
use clap::Parser;
use followup_server::logging::{self, LogConfig, LogFormat};
use followup_server::{app, config::Config, state::AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// followup server - personal follow-up tracker backed by Google Drive.
#[derive(Parser, Debug)]
#[command(name = "followup-server")]
#[command(about = "HTTP API for the Drive-backed follow-up tracker")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.quiet,
        cli.log_format,
    ));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing::info!(target: "followup::startup", "Loaded configuration (port: {})", config.port);

    let state = Arc::new(AppState::new(config.clone()));
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(target: "followup::startup", "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
