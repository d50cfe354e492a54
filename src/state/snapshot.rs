//! Point-in-time state dump used to populate a [`Matrix`](super::Matrix)
//! outside a running daemon.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::channel::Channel;
use super::client::{Client, Traffic};
use super::conf::ConfStore;
use super::tables::Tables;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] toml::de::Error),
}

/// This server's own connection data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerTraffic {
    pub since: i64,
    pub send: Traffic,
    pub recv: Traffic,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub me: ServerTraffic,
    pub clients: Vec<Client>,
    pub channels: Vec<Channel>,
    pub conf: ConfStore,
    pub tables: Tables,
}

impl Snapshot {
    /// Load a snapshot from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
