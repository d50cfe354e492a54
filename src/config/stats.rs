//! STATS pacing and visibility configuration.

use serde::Deserialize;

use super::defaults::{default_masked, default_pace_wait};

/// How much of a report a non-operator may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperOnly {
    /// Everyone sees the full listing.
    #[default]
    No,
    /// Non-operators only see the entry matching their own user@host.
    Masked,
    /// Non-operators are refused.
    Yes,
}

/// `[stats]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Minimum seconds between admitted requests from local non-operators.
    /// Shared by every requester on the server.
    #[serde(default = "default_pace_wait")]
    pub pace_wait: u64,
    /// Refuse `stats e` to everyone.
    #[serde(default)]
    pub stats_e_disabled: bool,
    #[serde(default = "default_masked")]
    pub stats_i_oper_only: OperOnly,
    #[serde(default = "default_masked")]
    pub stats_k_oper_only: OperOnly,
    #[serde(default)]
    pub stats_m_oper_only: bool,
    #[serde(default)]
    pub stats_o_oper_only: bool,
    /// Listener report (`stats P`).
    #[serde(default)]
    pub stats_p_oper_only: bool,
    #[serde(default)]
    pub stats_u_oper_only: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            pace_wait: default_pace_wait(),
            stats_e_disabled: false,
            stats_i_oper_only: default_masked(),
            stats_k_oper_only: default_masked(),
            stats_m_oper_only: false,
            stats_o_oper_only: false,
            stats_p_oper_only: false,
            stats_u_oper_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: StatsConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.pace_wait, 10);
        assert_eq!(cfg.stats_i_oper_only, OperOnly::Masked);
        assert_eq!(cfg.stats_k_oper_only, OperOnly::Masked);
        assert!(!cfg.stats_e_disabled);
        assert!(!cfg.stats_o_oper_only);
    }

    #[test]
    fn oper_only_levels_parse() {
        let cfg: StatsConfig = toml::from_str(
            r#"
            stats_i_oper_only = "yes"
            stats_k_oper_only = "no"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.stats_i_oper_only, OperOnly::Yes);
        assert_eq!(cfg.stats_k_oper_only, OperOnly::No);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let res: Result<StatsConfig, _> = toml::from_str(r#"stats_i_oper_only = "sometimes""#);
        assert!(res.is_err());
    }
}
