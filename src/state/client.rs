//! Clients as seen by this server: users, servers and half-open connections.

use serde::Deserialize;
use std::net::IpAddr;

use super::Uid;

/// Registration state of a client entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// Connection that has not completed registration.
    Unknown,
    /// Registered user.
    #[default]
    User,
    /// Linked server.
    Server,
    /// Server link that is exchanging credentials.
    Handshake,
    /// Outbound server link still connecting.
    Connecting,
}

/// User modes relevant to STATS visibility.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserModes {
    #[serde(default)]
    pub invisible: bool, // +i
    #[serde(default)]
    pub oper: bool, // +o
    #[serde(default)]
    pub admin: bool, // +a
    /// Operator hidden from `stats p` (+H).
    #[serde(default)]
    pub hidden: bool,
    /// Idle time hidden from non-operators (+q).
    #[serde(default)]
    pub hide_idle: bool,
    /// Server notice masks (+s), one letter per mask.
    #[serde(default)]
    pub snomasks: String,
}

impl UserModes {
    pub fn has_snomask(&self, mask: char) -> bool {
        self.snomasks.contains(mask)
    }
}

/// Message and byte counters for one direction of a connection.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct Traffic {
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub bytes: u64,
}

/// A LIST query in progress.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListTask {
    #[serde(default)]
    pub show_mask: Vec<String>,
    #[serde(default)]
    pub hide_mask: Vec<String>,
}

/// Per-socket data, present only for clients connected to this server.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LocalConnection {
    pub ip: Option<IpAddr>,
    /// Bytes queued for sending.
    #[serde(default)]
    pub sendq: u64,
    #[serde(default)]
    pub send: Traffic,
    #[serde(default)]
    pub recv: Traffic,
    /// When the socket was accepted.
    #[serde(default)]
    pub firsttime: i64,
    /// Last registration state change.
    #[serde(default)]
    pub since: i64,
    /// Last data received.
    #[serde(default)]
    pub lasttime: i64,
    /// Last PRIVMSG sent, for idle time.
    #[serde(default)]
    pub last_privmsg: i64,
    /// Configuration entries attached to this connection.
    #[serde(default)]
    pub confs: u32,
    /// WATCH entries owned by this connection.
    #[serde(default)]
    pub watches: u32,
    #[serde(default)]
    pub list_task: Option<ListTask>,
    /// Password given with PASS.
    #[serde(default)]
    pub password: Option<String>,
    /// Operator privilege letters granted by the oper block.
    #[serde(default)]
    pub oper_privs: String,
}

/// A user, server or unregistered connection.
#[derive(Debug, Clone, Deserialize)]
pub struct Client {
    pub uid: Uid,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub kind: ClientKind,
    #[serde(default)]
    pub modes: UserModes,
    #[serde(default)]
    pub away: Option<String>,
    /// Server this client is attached to; empty means this server.
    #[serde(default)]
    pub server: String,
    /// Directly linked server through which a remote client is reached.
    #[serde(default)]
    pub via: Option<String>,
    /// Server entry flagged as a services server.
    #[serde(default)]
    pub service: bool,
    /// Capabilities negotiated with a linked server.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Operator who initiated a server connection.
    #[serde(default)]
    pub connected_by: Option<String>,
    /// Present iff the client is connected to this server.
    #[serde(default)]
    pub connection: Option<LocalConnection>,
}

impl Client {
    /// Connected to this server rather than relayed through a link.
    #[inline]
    pub fn is_local(&self) -> bool {
        self.connection.is_some()
    }

    #[inline]
    pub fn is_server(&self) -> bool {
        self.kind == ClientKind::Server
    }

    #[inline]
    pub fn is_user(&self) -> bool {
        self.kind == ClientKind::User
    }

    /// Unregistered, handshaking or connecting.
    pub fn is_unregistered(&self) -> bool {
        matches!(
            self.kind,
            ClientKind::Unknown | ClientKind::Handshake | ClientKind::Connecting
        )
    }

    /// Server, or a connection on its way to becoming one.
    pub fn is_server_link(&self) -> bool {
        matches!(
            self.kind,
            ClientKind::Server | ClientKind::Handshake | ClientKind::Connecting
        )
    }

    /// Name of the server the client is on, resolving the local shorthand.
    pub fn server_name<'a>(&'a self, me: &'a str) -> &'a str {
        if self.server.is_empty() { me } else { &self.server }
    }

    /// "TS" followed by the negotiated capabilities.
    pub fn capability_string(&self) -> String {
        let mut out = String::from("TS");
        for cap in &self.capabilities {
            out.push(' ');
            out.push_str(cap);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(kind: ClientKind) -> Client {
        Client {
            uid: "001AAAAAA".into(),
            name: "test".into(),
            username: "t".into(),
            host: "host".into(),
            kind,
            modes: UserModes::default(),
            away: None,
            server: String::new(),
            via: None,
            service: false,
            capabilities: vec!["EX".into(), "IE".into()],
            connected_by: None,
            connection: None,
        }
    }

    #[test]
    fn kind_predicates() {
        assert!(client(ClientKind::Handshake).is_unregistered());
        assert!(client(ClientKind::Handshake).is_server_link());
        assert!(!client(ClientKind::User).is_server_link());
        assert!(client(ClientKind::Server).is_server());
    }

    #[test]
    fn local_server_name_falls_back_to_me() {
        let c = client(ClientKind::User);
        assert_eq!(c.server_name("irc.example.net"), "irc.example.net");
    }

    #[test]
    fn capabilities_are_prefixed_with_ts() {
        assert_eq!(client(ClientKind::Server).capability_string(), "TS EX IE");
    }
}
