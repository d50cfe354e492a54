//! The Matrix - Central shared state for the IRC server.
//!
//! The Matrix holds all clients, channels, configuration entries and process
//! tables in concurrent data structures accessible from any async task.

use dashmap::DashMap;
use parking_lot::RwLock;
use slirc_proto::{Message, Prefix, irc_to_lower};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use super::channel::Channel;
use super::client::{Client, Traffic};
use super::conf::ConfStore;
use super::pacing::PacingState;
use super::snapshot::Snapshot;
use super::tables::Tables;
use super::Uid;
use crate::config::Config;

/// This server's identity and own traffic.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub sid: String,
    pub name: String,
    pub description: String,
    /// Process start, seconds since the epoch.
    pub since: i64,
    pub send: Traffic,
    pub recv: Traffic,
}

/// The Matrix - Central shared state container.
pub struct Matrix {
    /// This server's identity.
    pub server_info: ServerInfo,

    /// Server configuration (for handlers to access).
    pub config: Config,

    /// Every known client (local and remote users, servers, unregistered
    /// connections), indexed by UID/SID.
    pub clients: DashMap<Uid, Arc<Client>>,

    /// Lowercase nick or server name to UID.
    pub names: DashMap<String, Uid>,

    /// All channels, indexed by lowercase name.
    pub channels: DashMap<String, Arc<Channel>>,

    /// Configuration entries.
    pub conf: RwLock<ConfStore>,

    /// Listeners, events, caches and counters.
    pub tables: RwLock<Tables>,

    /// Global STATS pacing.
    pub pacing: PacingState,

    /// UID to message sender mapping for local clients.
    pub senders: DashMap<Uid, mpsc::Sender<Message>>,

    /// Lowercase server name to sender, for directly linked servers.
    pub links: DashMap<String, mpsc::Sender<Message>>,
}

impl Matrix {
    /// Create an empty Matrix started at `since`.
    pub fn new(config: Config, since: i64) -> Self {
        let server_info = ServerInfo {
            sid: config.server.sid.clone(),
            name: config.server.name.clone(),
            description: config.server.description.clone(),
            since,
            send: Traffic::default(),
            recv: Traffic::default(),
        };

        Self {
            server_info,
            config,
            clients: DashMap::new(),
            names: DashMap::new(),
            channels: DashMap::new(),
            conf: RwLock::new(ConfStore::default()),
            tables: RwLock::new(Tables::default()),
            pacing: PacingState::default(),
            senders: DashMap::new(),
            links: DashMap::new(),
        }
    }

    /// Build the Matrix from a loaded snapshot.
    pub fn from_snapshot(config: Config, snapshot: Snapshot) -> Self {
        let mut matrix = Self::new(config, snapshot.me.since);
        matrix.server_info.send = snapshot.me.send;
        matrix.server_info.recv = snapshot.me.recv;
        *matrix.conf.get_mut() = snapshot.conf;
        *matrix.tables.get_mut() = snapshot.tables;

        for client in snapshot.clients {
            matrix.add_client(client);
        }
        for channel in snapshot.channels {
            matrix.add_channel(channel);
        }

        debug!(
            clients = matrix.clients.len(),
            channels = matrix.channels.len(),
            "Matrix loaded from snapshot"
        );
        matrix
    }

    pub fn add_client(&self, client: Client) {
        self.names
            .insert(irc_to_lower(&client.name), client.uid.clone());
        self.clients.insert(client.uid.clone(), Arc::new(client));
    }

    pub fn add_channel(&self, channel: Channel) {
        self.channels
            .insert(irc_to_lower(&channel.name), Arc::new(channel));
    }

    /// Look a client up by nick, server name or UID.
    pub fn find_client(&self, name: &str) -> Option<Arc<Client>> {
        let uid = self
            .names
            .get(&irc_to_lower(name))
            .map(|r| r.value().clone())
            .unwrap_or_else(|| name.to_string());
        self.clients.get(&uid).map(|r| Arc::clone(r.value()))
    }

    /// Clients matching `pred`, in introduction (UID) order.
    pub fn clients_where(&self, pred: impl Fn(&Client) -> bool) -> Vec<Arc<Client>> {
        let mut out: Vec<_> = self
            .clients
            .iter()
            .filter(|r| pred(r.value()))
            .map(|r| Arc::clone(r.value()))
            .collect();
        out.sort_by(|a, b| a.uid.cmp(&b.uid));
        out
    }

    /// Registered users connected to this server.
    pub fn local_users(&self) -> Vec<Arc<Client>> {
        self.clients_where(|c| c.is_local() && c.is_user())
    }

    /// Servers linked directly to this one.
    pub fn local_servers(&self) -> Vec<Arc<Client>> {
        self.clients_where(|c| c.is_local() && c.is_server())
    }

    /// Local connections that have not registered yet.
    pub fn unknowns(&self) -> Vec<Arc<Client>> {
        self.clients_where(|c| c.is_local() && c.is_unregistered())
    }

    /// Local users with operator status.
    pub fn local_opers(&self) -> Vec<Arc<Client>> {
        self.clients_where(|c| c.is_local() && c.is_user() && c.modes.oper)
    }

    /// Route outgoing messages for a local client.
    pub fn register_sender(&self, uid: &str, tx: mpsc::Sender<Message>) {
        self.senders.insert(uid.to_string(), tx);
    }

    /// Route outgoing messages to a directly linked server.
    pub fn register_link(&self, name: &str, tx: mpsc::Sender<Message>) {
        self.links.insert(irc_to_lower(name), tx);
    }

    /// Send a server notice to local operators subscribed to `mask`.
    pub async fn send_snomask(&self, mask: char, message: &str) {
        // Target is * for server notices
        let notice_msg = Message::notice("*", format!("*** Notice -- {}", message))
            .with_prefix(Prefix::ServerName(self.server_info.name.clone()));

        // Collect first so no map guard is held across an await.
        let targets: Vec<mpsc::Sender<Message>> = self
            .clients
            .iter()
            .filter(|c| c.is_local() && c.modes.oper && c.modes.has_snomask(mask))
            .filter_map(|c| self.senders.get(&c.uid).map(|s| s.value().clone()))
            .collect();

        for sender in targets {
            let _ = sender.send(notice_msg.clone()).await;
        }
    }
}
