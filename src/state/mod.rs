//! Shared server state.
//!
//! The [`Matrix`] is the single shared container; everything else in this
//! module is the record types it holds.

mod channel;
mod client;
mod conf;
mod matrix;
mod pacing;
mod snapshot;
mod tables;

/// Unique user identifier (TS6 format: 9 characters, 3 for servers).
pub type Uid = String;

pub use channel::{BanEntry, Channel, Membership};
pub use client::{Client, ClientKind, ListTask, LocalConnection, Traffic, UserModes};
pub use conf::{
    AuthBlock, AuthFlags, Class, ClusterBlock, ConfStore, ConnectBlock, DLine, Exempt, GecosBan,
    KLine, OperBlock, Resv, ServiceBlock, ShareType, SharedBlock, host_matches,
};
pub use matrix::{Matrix, ServerInfo};
pub use pacing::{Admission, PacingState};
pub use snapshot::{ServerTraffic, Snapshot, SnapshotError};
pub use tables::{
    CommandUsage, ConnectionCounts, FdEntry, IpCacheEntry, Listener, MotdEntry, ScheduledEvent,
    ServerCounters, Tables, WatchHeader, WhowasCache, WhowasEntry,
};
