//! Process-level tables owned by other subsystems: listeners, scheduled
//! events, resolver, caches, descriptors and counters.

use serde::Deserialize;
use std::net::IpAddr;

use super::Uid;

/// A listening socket.
#[derive(Debug, Clone, Deserialize)]
pub struct Listener {
    pub port: u16,
    /// Bound address or hostname.
    pub name: String,
    /// Connections accepted on this socket still open.
    #[serde(default)]
    pub ref_count: u32,
    #[serde(default)]
    pub hidden: bool,
    /// Accepts server links only.
    #[serde(default)]
    pub server: bool,
    #[serde(default)]
    pub tls: bool,
    #[serde(default = "enabled")]
    pub active: bool,
}

fn enabled() -> bool {
    true
}

/// A recurring task.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledEvent {
    pub name: String,
    /// Next run, seconds since the epoch.
    pub next: i64,
}

/// One nickname's historical record.
#[derive(Debug, Clone, Deserialize)]
pub struct WhowasEntry {
    pub nick: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub realname: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub logout_time: i64,
}

/// Nickname history ring.
#[derive(Debug, Clone, Deserialize)]
pub struct WhowasCache {
    /// Slots in the ring.
    #[serde(default = "default_whowas_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub entries: Vec<WhowasEntry>,
}

fn default_whowas_capacity() -> u32 {
    15000
}

impl Default for WhowasCache {
    fn default() -> Self {
        Self {
            capacity: default_whowas_capacity(),
            entries: Vec::new(),
        }
    }
}

/// Users watching one nickname.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchHeader {
    pub nick: String,
    #[serde(default)]
    pub watchers: Vec<Uid>,
    #[serde(default)]
    pub lasttime: i64,
}

/// Connection throttling record for one address.
#[derive(Debug, Clone, Deserialize)]
pub struct IpCacheEntry {
    pub ip: IpAddr,
    #[serde(default)]
    pub count_local: u32,
    #[serde(default)]
    pub last_attempt: i64,
}

/// An open descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct FdEntry {
    pub fd: i32,
    pub desc: String,
}

/// A MOTD file bound to a host mask.
#[derive(Debug, Clone, Deserialize)]
pub struct MotdEntry {
    pub mask: String,
    pub path: String,
    /// Lines read from `path`, empty until the file is first served.
    #[serde(default)]
    pub cache: Vec<String>,
}

/// Usage counters for one command.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandUsage {
    pub name: String,
    /// Uses by local clients.
    #[serde(default)]
    pub count: u32,
    /// Bytes received with this command.
    #[serde(default)]
    pub bytes: u64,
    /// Uses relayed from other servers.
    #[serde(default)]
    pub remote_count: u32,
}

/// Historical traffic counters, updated when connections close.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerCounters {
    pub accepts: u32,
    pub refused: u32,
    pub unknown_commands: u32,
    pub unknown_prefixes: u32,
    pub nick_collisions: u32,
    pub unknown_closes: u32,
    pub wrong_direction: u32,
    pub empty: u32,
    pub numerics: u32,
    pub auth_successes: u32,
    pub auth_fails: u32,
    pub clients: u32,
    pub servers: u32,
    pub client_bytes_sent: u64,
    pub client_bytes_recv: u64,
    pub server_bytes_sent: u64,
    pub server_bytes_recv: u64,
    pub client_time: u64,
    pub server_time: u64,
}

/// Connection high-water marks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionCounts {
    pub max_local_connections: u32,
    pub max_local_clients: u32,
    /// Connections accepted since the last restart.
    pub total_accepted: u32,
}

/// Everything above, grouped for the shared state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub listeners: Vec<Listener>,
    pub events: Vec<ScheduledEvent>,
    /// Configured name servers as text; unparseable entries are skipped.
    pub dns_servers: Vec<String>,
    pub whowas: WhowasCache,
    pub watch: Vec<WatchHeader>,
    pub ipcache: Vec<IpCacheEntry>,
    pub fds: Vec<FdEntry>,
    pub motds: Vec<MotdEntry>,
    pub commands: Vec<CommandUsage>,
    pub counters: ServerCounters,
    pub connections: ConnectionCounts,
}

impl Tables {
    /// Commands that have been used, most used first.
    ///
    /// Ties keep table order.
    pub fn command_stats(&self) -> Vec<&CommandUsage> {
        let mut stats: Vec<_> = self
            .commands
            .iter()
            .filter(|c| c.count > 0 || c.remote_count > 0)
            .collect();
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats
    }
}
