//! Platform-specific directory utilities
//!
//! Follows platform conventions for data and cache directories, with a
//! relative fallback when no home directory can be determined.
use std::path::PathBuf;

use directories::ProjectDirs;

const APP_NAME: &str = "idle-arpg";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Directory holding save files
///
/// - Linux: `~/.local/share/idle-arpg/saves`
/// - macOS: `~/Library/Application Support/idle-arpg/saves`
/// - Fallback: `./save_data`
pub fn save_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Directory holding per-session log folders
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(format!("/tmp/{APP_NAME}/logs")))
}
