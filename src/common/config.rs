//! Configuration file handling

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};
use crate::client::Credentials;
use crate::probe::{default_groups, RouteGroup};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Backend location
    #[serde(default)]
    pub server: ServerConfig,

    /// Administrator credentials for the review steps
    #[serde(default)]
    pub admin: AdminConfig,

    /// Route prober settings
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Timing settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Backend location
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Base URL every API path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Administrator credentials
#[derive(Debug, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl AdminConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}
fn default_admin_password() -> String {
    "admin123".to_string()
}

/// Route prober settings
#[derive(Debug, Deserialize)]
pub struct ProbeConfig {
    /// Account the prober logs in with
    #[serde(default = "default_probe_username")]
    pub username: String,

    #[serde(default = "default_probe_password")]
    pub password: String,

    /// Candidate path groups; replaces the built-in balance/transactions lists
    #[serde(default = "default_groups")]
    pub groups: Vec<RouteGroup>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            username: default_probe_username(),
            password: default_probe_password(),
            groups: default_groups(),
        }
    }
}

impl ProbeConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

fn default_probe_username() -> String {
    "testuser".to_string()
}
fn default_probe_password() -> String {
    "password123".to_string()
}

/// Timing settings
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Delay before re-reading status after an admin decision
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Per-request timeout; unset means the HTTP client default
    #[serde(default)]
    pub request_secs: Option<u64>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            request_secs: None,
        }
    }
}

impl Timeouts {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }
}

fn default_settle_ms() -> u64 {
    1000
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        if config.probe.groups.iter().any(|g| g.paths.is_empty()) {
            return Err(Error::Config(
                "every [[probe.groups]] entry needs at least one path".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "admin123");
        assert_eq!(config.probe.username, "testuser");
        assert_eq!(config.probe.groups.len(), 2);
        assert_eq!(config.timeouts.settle_delay(), Duration::from_secs(1));
        assert!(config.timeouts.request_timeout().is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [server]
            base_url = "http://staging:8080"

            [admin]
            password = "s3cret"

            [timeouts]
            settle_ms = 250
            request_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://staging:8080");
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "s3cret");
        assert_eq!(config.timeouts.settle_delay(), Duration::from_millis(250));
        assert_eq!(
            config.timeouts.request_timeout(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_probe_groups_override() {
        let config = Config::parse(
            r#"
            [[probe.groups]]
            name = "Profile"
            paths = ["/api/profile", "/profile"]
            "#,
        )
        .unwrap();
        assert_eq!(config.probe.groups.len(), 1);
        assert_eq!(config.probe.groups[0].name, "Profile");
        assert_eq!(config.probe.groups[0].paths, vec!["/api/profile", "/profile"]);
    }

    #[test]
    fn test_probe_group_without_paths_rejected() {
        let err = Config::parse(
            r#"
            [[probe.groups]]
            name = "Empty"
            paths = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::parse("[server\nbase_url = 1").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[probe]\nusername = \"bob\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.probe.username, "bob");
        assert_eq!(config.probe.password, "password123");
    }
}
