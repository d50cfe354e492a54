//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use super::stats::OperOnly;

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_description() -> String {
    "slircd-ng IRC server".to_string()
}

// =============================================================================
// STATS Defaults
// =============================================================================

/// Seconds between two admitted STATS requests from unprivileged users.
pub fn default_pace_wait() -> u64 {
    10
}

/// `stats i` and `stats k`: non-opers only see entries matching themselves.
pub fn default_masked() -> OperOnly {
    OperOnly::Masked
}
