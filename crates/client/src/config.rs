//! Client configuration: environment first, command line on top.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::dirs;

/// Fully resolved client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub session_id: String,
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
    /// RON content directory; built-in content when unset
    pub content_dir: Option<PathBuf>,
    /// Stop after this long; run until Ctrl-C when unset
    pub run_for: Option<Duration>,
    pub report_every: Duration,
    /// Discard the existing save before starting
    pub fresh: bool,
    /// Seed for loot and spawns; entropy when unset
    pub seed: Option<u64>,
    pub persist: bool,
    /// Let the built-in autopilot unlock skills and attack
    pub autopilot: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_id: default_session_id(),
            save_dir: dirs::save_dir(),
            log_dir: dirs::log_dir(),
            content_dir: None,
            run_for: None,
            report_every: Duration::from_secs(5),
            fresh: false,
            seed: None,
            persist: true,
            autopilot: true,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SESSION_ID` - Session identifier for save and log files (default: timestamped)
    /// - `SAVE_DATA_DIR` - Directory for save files (default: platform data dir)
    /// - `LOG_DIR` - Directory for session logs (default: platform cache dir)
    /// - `CONTENT_DIR` - Directory with `skills.ron`, `supports.ron`, `passive_tree.ron`
    /// - `RUN_FOR_SECS` - Session length in seconds (default: until Ctrl-C)
    /// - `REPORT_EVERY_SECS` - Progress report interval (default: 5)
    /// - `GAME_SEED` - Seed for loot and enemy spawns
    /// - `ENABLE_PERSISTENCE` - Save after every action (default: true)
    /// - `AUTOPILOT` - Unlock skills and attack automatically (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(session) = env::var("GAME_SESSION_ID")
            && !session.trim().is_empty()
        {
            config.session_id = session;
        }
        if let Ok(dir) = env::var("SAVE_DATA_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        config.content_dir = env::var("CONTENT_DIR").ok().map(PathBuf::from);
        config.run_for = read_env::<u64>("RUN_FOR_SECS").map(Duration::from_secs);
        if let Some(secs) = read_env::<u64>("REPORT_EVERY_SECS") {
            config.report_every = Duration::from_secs(secs.max(1));
        }
        config.seed = read_env::<u64>("GAME_SEED");
        if let Some(enable) = read_env::<bool>("ENABLE_PERSISTENCE") {
            config.persist = enable;
        }
        if let Some(enable) = read_env::<bool>("AUTOPILOT") {
            config.autopilot = enable;
        }

        config
    }

    /// Applies command line overrides.
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let Some(session) = cli.session {
            self.session_id = session;
        }
        if let Some(dir) = cli.save_dir {
            self.save_dir = dir;
        }
        if let Some(dir) = cli.log_dir {
            self.log_dir = dir;
        }
        if cli.content_dir.is_some() {
            self.content_dir = cli.content_dir;
        }
        if let Some(secs) = cli.run_for {
            self.run_for = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = cli.report_every {
            self.report_every = Duration::from_secs(secs.max(1));
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        self.fresh |= cli.fresh;
        if cli.no_save {
            self.persist = false;
        }
        if cli.no_autopilot {
            self.autopilot = false;
        }
        self
    }
}

/// Idle ARPG headless client
#[derive(Parser, Debug, Default)]
#[command(name = "idle-arpg", version, long_about = None)]
pub struct Cli {
    /// Session identifier (save file and log folder name)
    #[arg(long)]
    pub session: Option<String>,

    /// Directory for save files
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Directory for session logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Directory with RON content files
    #[arg(long)]
    pub content_dir: Option<PathBuf>,

    /// Stop after this many seconds
    #[arg(long, value_name = "SECS")]
    pub run_for: Option<u64>,

    /// Seconds between progress reports
    #[arg(long, value_name = "SECS")]
    pub report_every: Option<u64>,

    /// Seed for loot and enemy spawns
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delete the existing save and start a new game
    #[arg(long)]
    pub fresh: bool,

    /// Do not write saves
    #[arg(long)]
    pub no_save: bool,

    /// Only watch: no skill unlocks or basic attacks
    #[arg(long)]
    pub no_autopilot: bool,
}

fn default_session_id() -> String {
    format!("session_{}", chrono::Utc::now().timestamp())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_defaults() {
        let cli = Cli::parse_from([
            "idle-arpg",
            "--session",
            "hero",
            "--run-for",
            "30",
            "--seed",
            "9",
            "--fresh",
            "--no-save",
        ]);
        let config = ClientConfig::default().with_cli(cli);

        assert_eq!(config.session_id, "hero");
        assert_eq!(config.run_for, Some(Duration::from_secs(30)));
        assert_eq!(config.seed, Some(9));
        assert!(config.fresh);
        assert!(!config.persist);
    }

    #[test]
    fn empty_cli_keeps_configuration() {
        let base = ClientConfig {
            session_id: "kept".into(),
            report_every: Duration::from_secs(2),
            ..ClientConfig::default()
        };
        let config = base.with_cli(Cli::parse_from(["idle-arpg"]));
        assert_eq!(config.session_id, "kept");
        assert_eq!(config.report_every, Duration::from_secs(2));
        assert!(config.persist);
        assert!(config.run_for.is_none());
    }

    #[test]
    fn report_interval_is_at_least_one_second() {
        let config =
            ClientConfig::default().with_cli(Cli::parse_from(["idle-arpg", "--report-every", "0"]));
        assert_eq!(config.report_every, Duration::from_secs(1));
    }
}
