//! Where outline-mirror keeps its files
//!
//! Resolution order for the base directory:
//! 1. `$OUTLINE_MIRROR_HOME` if set
//! 2. `$XDG_CONFIG_HOME/outline-mirror`
//! 3. the platform config dir (`~/.config`, `%APPDATA%`) + `outline-mirror`

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "outline-mirror";

/// Overrides every other location when set
pub const HOME_ENV: &str = "OUTLINE_MIRROR_HOME";

/// Base name of the rotating log file
pub const LOG_FILE_PREFIX: &str = "outline-mirror.log";

pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(
        std::env::var_os(HOME_ENV),
        std::env::var_os("XDG_CONFIG_HOME"),
        dirs::config_dir(),
    )
}

fn resolve_config_dir(
    explicit: Option<OsString>,
    xdg: Option<OsString>,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(dir) = explicit.filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    xdg.filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or(platform)
        .map(|base| base.join(APP_DIR))
}

/// `<config dir>/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `<config dir>/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs dir if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Newest rotated log in `dir` (`outline-mirror.log.YYYY-MM-DD`)
pub fn latest_log_file(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX))
        })
        // rotation suffixes are ISO dates, so name order is date order
        .max_by_key(|entry| entry.file_name())
        .map(|entry| entry.path())
}
