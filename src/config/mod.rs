//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config, server identity and server-hiding options
//! - [`stats`]: STATS pacing and per-category visibility policy
//! - [`defaults`]: serde default functions shared by the above

mod defaults;
mod stats;
mod types;

pub use stats::{OperOnly, StatsConfig};
pub use types::{Config, ConfigError, ServerConfig, ServerHideConfig};
