//! Who is asking, and how much of a connection's address they may see.

use super::Privilege;
use crate::state::Client;
use slirc_proto::irc_eq;
use std::net::IpAddr;

/// The requester's standing, captured once per request.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub nick: String,
    pub uid: String,
    pub is_oper: bool,
    pub is_admin: bool,
    /// Connected directly to this server.
    pub is_local: bool,
}

impl Viewer {
    pub fn of(client: &Client) -> Self {
        Self {
            nick: client.name.clone(),
            uid: client.uid.clone(),
            is_oper: client.modes.oper,
            is_admin: client.modes.admin,
            is_local: client.is_local(),
        }
    }

    #[inline]
    pub fn is_local_oper(&self) -> bool {
        self.is_local && self.is_oper
    }

    /// Whether this viewer satisfies `required`.
    pub fn has(&self, required: Privilege) -> bool {
        match required {
            Privilege::None => true,
            Privilege::Oper => self.is_oper,
            Privilege::Admin => self.is_admin,
        }
    }
}

/// How a connection's address is rendered in `name[user@address]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Numeric address.
    Show,
    /// Hostname.
    Hide,
    /// All-ones placeholder address.
    Mask,
}

const MASKED_V4: &str = "255.255.255.255";
const MASKED_V6: &str = "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff";

/// Display name of `target`, decorated with its address for local
/// connections.
///
/// Remote clients and connections whose name equals their host get the bare
/// name. Server links are always masked when `hide_server_ips` is set.
pub fn client_name(target: &Client, mode: AddressMode, hide_server_ips: bool) -> String {
    let Some(conn) = target.connection.as_ref() else {
        return target.name.clone();
    };
    if irc_eq(&target.name, &target.host) {
        return target.name.clone();
    }

    let mode = if hide_server_ips && target.is_server_link() {
        AddressMode::Mask
    } else {
        mode
    };

    let address = match mode {
        AddressMode::Show => conn.ip.map_or_else(|| "0".to_string(), |ip| ip.to_string()),
        AddressMode::Hide => target.host.clone(),
        AddressMode::Mask => match conn.ip {
            Some(IpAddr::V6(_)) => MASKED_V6.to_string(),
            _ => MASKED_V4.to_string(),
        },
    };

    format!("{}[{}@{}]", target.name, target.username, address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::stats::test_support::{remote_user, server, user};

    #[test]
    fn remote_clients_show_only_their_name() {
        let c = remote_user("002AAAAAA", "far", "hub.example.net");
        assert_eq!(client_name(&c, AddressMode::Show, false), "far");
    }

    #[test]
    fn address_modes() {
        let c = user("001AAAAAA", "alice");
        assert_eq!(
            client_name(&c, AddressMode::Show, false),
            "alice[alice@192.0.2.10]"
        );
        assert_eq!(
            client_name(&c, AddressMode::Hide, false),
            "alice[alice@alice.example.com]"
        );
        assert_eq!(
            client_name(&c, AddressMode::Mask, false),
            "alice[alice@255.255.255.255]"
        );
    }

    #[test]
    fn missing_address_shows_zero() {
        let mut c = user("001AAAAAA", "alice");
        if let Some(conn) = c.connection.as_mut() {
            conn.ip = None;
        }
        assert_eq!(client_name(&c, AddressMode::Show, false), "alice[alice@0]");
    }

    #[test]
    fn server_links_are_masked_when_hiding_ips() {
        let mut s = server("002", "leaf.example.net");
        if let Some(conn) = s.connection.as_mut() {
            conn.ip = Some("2001:db8::1".parse().unwrap());
        }
        assert_eq!(
            client_name(&s, AddressMode::Show, true),
            "leaf.example.net[leaf@ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff]"
        );
        assert_eq!(
            client_name(&s, AddressMode::Show, false),
            "leaf.example.net[leaf@2001:db8::1]"
        );
    }

    #[test]
    fn name_equal_to_host_is_bare() {
        let mut c = user("001AAAAAA", "alice");
        c.host = "ALICE".into();
        assert_eq!(client_name(&c, AddressMode::Show, false), "alice");
    }

    #[test]
    fn privilege_levels() {
        let mut c = user("001AAAAAA", "alice");
        let v = Viewer::of(&c);
        assert!(v.has(Privilege::None));
        assert!(!v.has(Privilege::Oper));

        c.modes.oper = true;
        let v = Viewer::of(&c);
        assert!(v.has(Privilege::Oper));
        assert!(!v.has(Privilege::Admin));
        assert!(v.is_local_oper());
    }
}
