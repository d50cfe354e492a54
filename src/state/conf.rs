//! Configuration entries reported by STATS: oper, connect, auth, ban and
//! permission blocks.
//!
//! Entries are loaded by the configuration subsystem and are read-only here.
//! Address lookups ([`ConfStore::find_auth`], [`ConfStore::find_kline`]) accept
//! glob host masks as well as CIDR blocks.

use ipnet::IpNet;
use serde::Deserialize;
use slirc_proto::wildcard_match;
use std::net::IpAddr;

/// An operator block.
#[derive(Debug, Clone, Deserialize)]
pub struct OperBlock {
    pub name: String,
    pub user: String,
    pub host: String,
    /// Privilege letters granted on OPER.
    #[serde(default)]
    pub privs: String,
    pub class: String,
}

/// A connect block for a server link.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectBlock {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub class: String,
    #[serde(default)]
    pub autoconnect: bool,
    #[serde(default)]
    pub tls: bool,
    /// Servers this peer may introduce.
    #[serde(default)]
    pub hub_masks: Vec<String>,
    /// Servers this peer may not introduce.
    #[serde(default)]
    pub leaf_masks: Vec<String>,
}

/// Flags on an auth block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthFlags {
    #[serde(default)]
    pub webirc: bool,
    #[serde(default)]
    pub no_tilde: bool,
    #[serde(default)]
    pub need_ident: bool,
    #[serde(default)]
    pub need_password: bool,
    #[serde(default)]
    pub exempt_resv: bool,
    #[serde(default)]
    pub spoof: bool,
    #[serde(default)]
    pub exempt_kline: bool,
    #[serde(default)]
    pub exempt_xline: bool,
    #[serde(default)]
    pub exempt_limits: bool,
    #[serde(default)]
    pub can_flood: bool,
}

/// An auth block granting client access.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthBlock {
    /// Spoofed hostname, if any.
    #[serde(default)]
    pub name: Option<String>,
    pub user: String,
    pub host: String,
    #[serde(default)]
    pub port: u16,
    pub class: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub flags: AuthFlags,
}

/// A user@host ban.
#[derive(Debug, Clone, Deserialize)]
pub struct KLine {
    pub user: String,
    pub host: String,
    pub reason: String,
    /// Expiry; `None` for permanent entries.
    #[serde(default)]
    pub until: Option<i64>,
}

/// An IP ban.
#[derive(Debug, Clone, Deserialize)]
pub struct DLine {
    pub host: String,
    pub reason: String,
    #[serde(default)]
    pub until: Option<i64>,
}

/// An address exempt from D-lines.
#[derive(Debug, Clone, Deserialize)]
pub struct Exempt {
    pub host: String,
}

/// A reserved channel or nickname.
#[derive(Debug, Clone, Deserialize)]
pub struct Resv {
    pub mask: String,
    pub reason: String,
    #[serde(default)]
    pub expire: Option<i64>,
}

/// A gecos (realname) ban.
#[derive(Debug, Clone, Deserialize)]
pub struct GecosBan {
    pub mask: String,
    pub reason: String,
    #[serde(default)]
    pub expire: Option<i64>,
}

/// A connection class.
#[derive(Debug, Clone, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default)]
    pub ping_freq: u32,
    #[serde(default)]
    pub con_freq: u32,
    #[serde(default)]
    pub max_total: u32,
    #[serde(default)]
    pub max_sendq: u32,
    #[serde(default)]
    pub max_recvq: u32,
    /// Connections currently using this class.
    #[serde(default)]
    pub ref_count: u32,
    #[serde(default)]
    pub number_per_cidr: u32,
    #[serde(default)]
    pub cidr_bitlen_ipv4: u32,
    #[serde(default)]
    pub cidr_bitlen_ipv6: u32,
    #[serde(default = "active")]
    pub active: bool,
}

fn active() -> bool {
    true
}

/// A services server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceBlock {
    pub name: String,
}

/// Ban types that can be shared with or propagated to other servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    Kline,
    Unkline,
    Xline,
    Unxline,
    Resv,
    Unresv,
    Locops,
    Dline,
    Undline,
}

impl ShareType {
    /// Report order with the letter shown when granted.
    pub const ALL: [(ShareType, char); 9] = [
        (ShareType::Kline, 'K'),
        (ShareType::Unkline, 'U'),
        (ShareType::Xline, 'X'),
        (ShareType::Unxline, 'Y'),
        (ShareType::Resv, 'Q'),
        (ShareType::Unresv, 'R'),
        (ShareType::Locops, 'L'),
        (ShareType::Dline, 'D'),
        (ShareType::Undline, 'E'),
    ];
}

/// Bans another server may place on this one.
#[derive(Debug, Clone, Deserialize)]
pub struct SharedBlock {
    pub server: String,
    #[serde(default = "star")]
    pub user: String,
    #[serde(default = "star")]
    pub host: String,
    #[serde(default)]
    pub types: Vec<ShareType>,
}

/// Bans this server propagates to others.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterBlock {
    pub server: String,
    #[serde(default)]
    pub types: Vec<ShareType>,
}

fn star() -> String {
    "*".to_string()
}

/// All configuration entries, in definition order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfStore {
    #[serde(default)]
    pub opers: Vec<OperBlock>,
    #[serde(default)]
    pub connects: Vec<ConnectBlock>,
    #[serde(default)]
    pub auths: Vec<AuthBlock>,
    #[serde(default)]
    pub klines: Vec<KLine>,
    #[serde(default)]
    pub dlines: Vec<DLine>,
    #[serde(default)]
    pub exempts: Vec<Exempt>,
    #[serde(default)]
    pub resv_channels: Vec<Resv>,
    #[serde(default)]
    pub resv_nicks: Vec<Resv>,
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub gecos: Vec<GecosBan>,
    #[serde(default)]
    pub services: Vec<ServiceBlock>,
    #[serde(default)]
    pub shared: Vec<SharedBlock>,
    #[serde(default)]
    pub clusters: Vec<ClusterBlock>,
}

/// Host part of a block against a connection's host and address.
///
/// The mask may be a CIDR block, a literal address or a glob.
pub fn host_matches(mask: &str, host: &str, ip: Option<IpAddr>) -> bool {
    if let Ok(net) = mask.parse::<IpNet>() {
        return ip.is_some_and(|ip| net.contains(&ip));
    }
    if let Ok(addr) = mask.parse::<IpAddr>() {
        return ip == Some(addr);
    }
    wildcard_match(mask, host) || ip.is_some_and(|ip| wildcard_match(mask, &ip.to_string()))
}

impl ConfStore {
    /// First auth block admitting `user@host`.
    ///
    /// Blocks requiring a password only match when `password` is given and
    /// equal.
    pub fn find_auth(
        &self,
        user: &str,
        host: &str,
        ip: Option<IpAddr>,
        password: Option<&str>,
    ) -> Option<&AuthBlock> {
        self.auths.iter().find(|auth| {
            wildcard_match(&auth.user, user)
                && host_matches(&auth.host, host, ip)
                && match (&auth.password, password) {
                    (Some(_), None) => !auth.flags.need_password,
                    (Some(expected), Some(given)) => expected == given,
                    (None, _) => true,
                }
        })
    }

    /// First K-line covering `user@host`, temporary or not.
    pub fn find_kline(&self, user: &str, host: &str, ip: Option<IpAddr>) -> Option<&KLine> {
        self.klines
            .iter()
            .find(|k| wildcard_match(&k.user, user) && host_matches(&k.host, host, ip))
    }

    /// Class by name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(user: &str, host: &str) -> AuthBlock {
        AuthBlock {
            name: None,
            user: user.into(),
            host: host.into(),
            port: 0,
            class: "users".into(),
            password: None,
            flags: AuthFlags::default(),
        }
    }

    #[test]
    fn cidr_mask_needs_an_address() {
        let ip: IpAddr = "192.0.2.10".parse().unwrap();
        assert!(host_matches("192.0.2.0/24", "whatever", Some(ip)));
        assert!(!host_matches("192.0.2.0/24", "whatever", None));
        assert!(!host_matches("198.51.100.0/24", "whatever", Some(ip)));
    }

    #[test]
    fn glob_mask_matches_host_or_address() {
        let ip: IpAddr = "192.0.2.10".parse().unwrap();
        assert!(host_matches("*.example.net", "a.example.net", None));
        assert!(host_matches("192.0.2.*", "a.example.net", Some(ip)));
        assert!(!host_matches("*.example.org", "a.example.net", Some(ip)));
    }

    #[test]
    fn find_auth_returns_first_match() {
        let store = ConfStore {
            auths: vec![auth("*", "*.example.org"), auth("*", "*"), auth("bob", "*")],
            ..Default::default()
        };
        let found = store.find_auth("bob", "h.example.net", None, None).unwrap();
        assert_eq!(found.host, "*");
    }

    #[test]
    fn password_gate_on_auth() {
        let mut locked = auth("*", "*");
        locked.password = Some("secret".into());
        locked.flags.need_password = true;
        let store = ConfStore {
            auths: vec![locked],
            ..Default::default()
        };
        assert!(store.find_auth("u", "h", None, None).is_none());
        assert!(store.find_auth("u", "h", None, Some("wrong")).is_none());
        assert!(store.find_auth("u", "h", None, Some("secret")).is_some());
    }

    #[test]
    fn find_kline_checks_user_and_host() {
        let store = ConfStore {
            klines: vec![KLine {
                user: "evil*".into(),
                host: "10.0.0.0/8".into(),
                reason: "no".into(),
                until: None,
            }],
            ..Default::default()
        };
        let ip = Some("10.1.2.3".parse().unwrap());
        assert!(store.find_kline("evilbot", "x", ip).is_some());
        assert!(store.find_kline("nice", "x", ip).is_none());
    }
}
