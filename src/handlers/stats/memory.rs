//! `z`: memory accounting.
//!
//! Counts come from the live tables; byte figures are counts multiplied by
//! the size of the record type that holds them, so they track the layout of
//! this server's own structures rather than allocator truth.

use super::{StatsReport, StatsRequest};
use crate::state::{
    BanEntry, Channel, Class, Client, IpCacheEntry, ListTask, Listener, LocalConnection, Matrix,
    Membership, MotdEntry, Resv, WatchHeader, WhowasEntry,
};
use slirc_proto::Message;
use std::mem::size_of;

/// Per-link overhead of an intrusive list node: payload and two links.
const LIST_NODE: usize = 3 * size_of::<usize>();

/// Items and the bytes they occupy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub count: usize,
    pub bytes: usize,
}

impl Usage {
    fn of<T>(count: usize) -> Self {
        Self {
            count,
            bytes: count * size_of::<T>(),
        }
    }

    fn nodes(count: usize, per_item: usize) -> Self {
        Self {
            count,
            bytes: count * per_item,
        }
    }
}

/// One sample of every figure the `z` report prints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySummary {
    pub watch_headers: Usage,
    pub watch_entries: Usage,
    /// Registered users; informational, not part of the grand total.
    pub clients: Usage,
    pub aways: usize,
    pub attached_confs: Usage,
    pub resv_channels: Usage,
    pub resv_nicks: Usage,
    pub listeners: Usage,
    pub classes: Usage,
    pub channels: Usage,
    pub topics: usize,
    pub bans: Usage,
    pub excepts: Usage,
    pub invex: Usage,
    pub members: Usage,
    pub invites: Usage,
    pub safelist: Usage,
    pub whowas_users: Usage,
    pub whowas_array: Usage,
    /// MOTD table entries, including their mask and path strings.
    pub motds: Usage,
    /// MOTD files with cached lines, and the lines they hold.
    pub motd_caches: Usage,
    pub iphash: Usage,
    pub local_clients: Usage,
    pub remote_clients: Usage,
}

impl MemorySummary {
    /// Sample the current state. Takes each lock once, briefly.
    pub fn collect(matrix: &Matrix) -> Self {
        let mut s = Self::default();

        let (mut watches, mut confs, mut users, mut local, mut remote) = (0, 0, 0, 0, 0);
        let (mut safelist, mut safelist_strings) = (0, 0);
        for entry in matrix.clients.iter() {
            let client: &Client = entry.value();
            if client.is_user() {
                users += 1;
                if client.away.is_some() {
                    s.aways += 1;
                }
            }
            let Some(conn) = client.connection.as_ref() else {
                remote += 1;
                continue;
            };
            local += 1;
            watches += conn.watches as usize;
            confs += conn.confs as usize;
            if let Some(task) = conn.list_task.as_ref() {
                safelist += 1;
                safelist_strings += task
                    .show_mask
                    .iter()
                    .chain(&task.hide_mask)
                    .map(String::len)
                    .sum::<usize>();
            }
        }

        s.clients = Usage::of::<Client>(users);
        s.watch_entries = Usage::nodes(watches, LIST_NODE * 2);
        s.attached_confs = Usage::nodes(confs, LIST_NODE);
        s.safelist = Usage::of::<ListTask>(safelist);
        s.safelist.bytes += safelist_strings;
        s.local_clients = Usage::nodes(local, size_of::<Client>() + size_of::<LocalConnection>());
        s.remote_clients = Usage::of::<Client>(remote);

        for entry in matrix.channels.iter() {
            let chan: &Channel = entry.value();
            s.channels.count += 1;
            if chan.has_topic() {
                s.topics += 1;
            }
            s.bans.count += chan.bans.len();
            s.excepts.count += chan.excepts.len();
            s.invex.count += chan.invex.len();
            s.members.count += chan.members.len();
            s.invites.count += chan.invites.len();
        }
        s.channels = Usage::of::<Channel>(s.channels.count);
        s.bans = Usage::of::<BanEntry>(s.bans.count);
        s.excepts = Usage::of::<BanEntry>(s.excepts.count);
        s.invex = Usage::of::<BanEntry>(s.invex.count);
        s.members = Usage::of::<Membership>(s.members.count);
        s.invites = Usage::nodes(s.invites.count, LIST_NODE * 2);

        {
            let conf = matrix.conf.read();
            s.resv_channels = Usage::of::<Resv>(conf.resv_channels.len());
            s.resv_nicks = Usage::of::<Resv>(conf.resv_nicks.len());
            s.classes = Usage::of::<Class>(conf.classes.len());
        }

        {
            let tables = matrix.tables.read();
            s.watch_headers = Usage::of::<WatchHeader>(tables.watch.len());
            s.listeners = Usage::of::<Listener>(tables.listeners.len());
            s.whowas_users = Usage::of::<WhowasEntry>(tables.whowas.entries.len());
            s.whowas_array = Usage::of::<usize>(tables.whowas.capacity as usize);
            s.iphash = Usage::of::<IpCacheEntry>(tables.ipcache.len());

            s.motds = Usage::of::<MotdEntry>(tables.motds.len());
            for motd in &tables.motds {
                s.motds.bytes += motd.mask.len() + 1 + motd.path.len() + 1;
                if motd.cache.is_empty() {
                    continue;
                }
                s.motd_caches.count += 1;
                s.motd_caches.bytes += motd
                    .cache
                    .iter()
                    .map(|line| size_of::<String>() + line.len())
                    .sum::<usize>();
            }
        }

        s
    }

    pub fn whowas_total(&self) -> usize {
        self.whowas_users.bytes + self.whowas_array.bytes
    }

    pub fn channel_total(&self) -> usize {
        self.channels.bytes
            + self.bans.bytes
            + self.excepts.bytes
            + self.invex.bytes
            + self.members.bytes
            + self.invites.bytes
    }

    pub fn conf_total(&self) -> usize {
        self.attached_confs.bytes
            + self.resv_channels.bytes
            + self.resv_nicks.bytes
            + self.classes.bytes
            + self.listeners.bytes
    }

    /// Grand total. The registered-user line overlaps the local and remote
    /// client figures, so it is left out.
    pub fn total(&self) -> usize {
        self.watch_headers.bytes
            + self.watch_entries.bytes
            + self.safelist.bytes
            + self.iphash.bytes
            + self.motds.bytes
            + self.motd_caches.bytes
            + self.whowas_total()
            + self.channel_total()
            + self.conf_total()
            + self.local_clients.bytes
            + self.remote_clients.bytes
    }

    /// Report lines, in print order.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                "WATCH headers {}({}) entries {}({})",
                self.watch_headers.count,
                self.watch_headers.bytes,
                self.watch_entries.count,
                self.watch_entries.bytes
            ),
            format!("Clients {}({})", self.clients.count, self.clients.bytes),
            format!("User aways {}", self.aways),
            format!(
                "Attached confs {}({})",
                self.attached_confs.count, self.attached_confs.bytes
            ),
            format!(
                "Resv channels {}({}) nicks {}({})",
                self.resv_channels.count,
                self.resv_channels.bytes,
                self.resv_nicks.count,
                self.resv_nicks.bytes
            ),
            format!(
                "Listeners allocated {}({})",
                self.listeners.count, self.listeners.bytes
            ),
            format!("Classes {}({})", self.classes.count, self.classes.bytes),
            format!(
                "Channels {}({}) Topics {}",
                self.channels.count, self.channels.bytes, self.topics
            ),
            format!("Bans {}({})", self.bans.count, self.bans.bytes),
            format!("Exceptions {}({})", self.excepts.count, self.excepts.bytes),
            format!("Invex {}({})", self.invex.count, self.invex.bytes),
            format!(
                "Channel members {}({}) invites {}({})",
                self.members.count, self.members.bytes, self.invites.count, self.invites.bytes
            ),
            format!("Safelist {}({})", self.safelist.count, self.safelist.bytes),
            format!(
                "Whowas users {}({})",
                self.whowas_users.count, self.whowas_users.bytes
            ),
            format!(
                "Whowas array {}({})",
                self.whowas_array.count, self.whowas_array.bytes
            ),
            format!("Motds {}({})", self.motds.count, self.motds.bytes),
            format!(
                "Motd caches {}({})",
                self.motd_caches.count, self.motd_caches.bytes
            ),
            format!("iphash {}({})", self.iphash.count, self.iphash.bytes),
            format!(
                "Total: whowas {} channel {} conf {}",
                self.whowas_total(),
                self.channel_total(),
                self.conf_total()
            ),
            format!(
                "Local client Memory in use: {}({})",
                self.local_clients.count, self.local_clients.bytes
            ),
            format!(
                "Remote client Memory in use: {}({})",
                self.remote_clients.count, self.remote_clients.bytes
            ),
            format!("TOTAL: {}", self.total()),
        ]
    }
}

pub struct MemoryReport;

impl StatsReport for MemoryReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        MemorySummary::collect(req.matrix)
            .lines()
            .into_iter()
            .map(|line| req.debug('z', line))
            .collect()
    }
}
