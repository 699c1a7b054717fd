//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations.

use std::path::PathBuf;

/// Name used for the per-user configuration directory
const APP_NAME: &str = "kyc-smoke";

/// Get the configuration directory path
///
/// - Linux: `~/.config/kyc-smoke/`
/// - macOS: `~/Library/Application Support/kyc-smoke/`
/// - Windows: `%APPDATA%\kyc-smoke\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
