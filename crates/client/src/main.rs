//! Idle ARPG headless client.
//!
//! Composition root: reads configuration, installs logging, loads content,
//! and runs one game session on the runtime until the configured duration
//! elapses or Ctrl-C arrives.
//!
//! ```bash
//! # play the "hero" save for two minutes, reporting every 10 seconds
//! cargo run -p idle-arpg-client -- --session hero --run-for 120 --report-every 10
//! ```
mod autopilot;
mod config;
mod dirs;
mod logging;
mod session;

use anyhow::Result;
use clap::Parser;

use config::{Cli, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    if let Err(error) = dotenvy::dotenv()
        && !error.not_found()
    {
        eprintln!("ignoring unreadable .env: {error}");
    }

    let config = ClientConfig::from_env().with_cli(Cli::parse());
    let _guard = logging::setup_logging(&config.log_dir, &config.session_id)?;

    tracing::info!("Starting idle ARPG client");
    tracing::info!("Session ID: {}", config.session_id);
    tracing::info!("Save directory: {}", config.save_dir.display());

    session::run(config).await
}
