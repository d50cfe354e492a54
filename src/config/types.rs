//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::default_description;
use super::stats::StatsConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// What the server hides from non-operators.
    #[serde(default)]
    pub serverhide: ServerHideConfig,
    /// STATS pacing and per-category policy.
    #[serde(default)]
    pub stats: StatsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.straylight.net").
    pub name: String,
    /// TS6 server ID (3 characters).
    pub sid: String,
    /// Server description (shown in LINKS).
    #[serde(default = "default_description")]
    pub description: String,
}

/// `[serverhide]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerHideConfig {
    /// Hide link topology (`stats ?`) from non-operators.
    #[serde(default)]
    pub flatten_links: bool,
    /// Hide service links from non-operators.
    #[serde(default)]
    pub hide_services: bool,
    /// Never reveal server IP addresses, not even to admins.
    #[serde(default)]
    pub hide_server_ips: bool,
    /// Unprivileged users may not route STATS to other servers.
    #[serde(default)]
    pub disable_remote_commands: bool,
}
