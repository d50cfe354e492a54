//! IRC message prefix types.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::fmt;

/// IRC message prefix - identifies the origin of a message.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prefix {
    /// Server name (e.g., "irc.example.com")
    ServerName(String),
    /// User prefix: (nickname, username, hostname)
    Nickname(String, String, String),
    /// Bare TS6 identifier (UID or SID) used on server links
    Id(String),
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) | Prefix::Id(name) => f.write_str(name),
            Prefix::Nickname(name, user, host) => match (user.is_empty(), host.is_empty()) {
                (true, true) => f.write_str(name),
                (false, true) => write!(f, "{}!{}", name, user),
                (true, false) => write!(f, "{}@{}", name, host),
                (false, false) => write!(f, "{}!{}@{}", name, user, host),
            },
        }
    }
}
