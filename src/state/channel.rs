//! Channel records.

use serde::Deserialize;

use super::Uid;

/// A ban, exception or invite-exception entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BanEntry {
    pub mask: String,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub when: i64,
}

/// A user's membership in a channel.
#[derive(Debug, Clone, Deserialize)]
pub struct Membership {
    pub uid: Uid,
    /// Prefix modes held (e.g. "o", "v").
    #[serde(default)]
    pub modes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub members: Vec<Membership>,
    #[serde(default)]
    pub invites: Vec<Uid>,
    #[serde(default)]
    pub bans: Vec<BanEntry>,
    #[serde(default)]
    pub excepts: Vec<BanEntry>,
    #[serde(default)]
    pub invex: Vec<BanEntry>,
}

impl Channel {
    pub fn has_topic(&self) -> bool {
        self.topic.as_deref().is_some_and(|t| !t.is_empty())
    }
}
