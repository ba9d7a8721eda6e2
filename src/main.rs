//! Ratedash API Server
//!
//! Run with: cargo run --bin ratedash
//!
//! # Configuration
//!
//! Loaded from `--config`, or else the first of
//! `~/.config/ratedash/config.toml`, `/etc/ratedash/config.toml` and
//! `./config.toml`. Environment variables override file settings:
//! - `RATEDASH_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `RATEDASH_API_PORT`: Port to listen on (default: 8050)
//! - `RATEDASH_AXIS_THRESHOLD`: Secondary axis ratio threshold (default: 5)
//! - `RATEDASH_LOG_LEVEL` / `RATEDASH_LOG_FORMAT`
//! - `RUST_LOG`: Full filter directives, takes precedence over the level

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use ratedash::api::{serve, AppState};
use ratedash::config::Config;
use ratedash::logging::init_logging;

#[derive(Parser)]
#[command(name = "ratedash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rate dashboard analysis API server")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let path = args.config.clone().or_else(Config::default_path);
    let config = match &path {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::from_env().context("loading config from environment")?,
    };

    init_logging(&config.logging).context("initializing logging")?;

    tracing::info!("Starting Ratedash API server v{}", env!("CARGO_PKG_VERSION"));
    match &path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::info!(
        axis_threshold = config.analysis.axis_threshold,
        lookback_1d = config.analysis.lookback_1d,
        lookback_1w = config.analysis.lookback_1w,
        lookback_1m = config.analysis.lookback_1m,
        lookback_3m = config.analysis.lookback_3m,
        "Analysis defaults"
    );

    let state = AppState::new(config.api, config.analysis);
    serve(state).await?;

    Ok(())
}
