//! `l`/`L`: per-connection link information.
//!
//! The target is a nick, a server name or a mask. Naming this server (or a
//! mask covering it) lists every local connection; invisible users are left
//! out of listings unless the viewer is a local operator.

use super::{AddressMode, StatsReport, StatsRequest, client_name};
use crate::handlers::helpers::{elapsed, err_needmoreparams};
use crate::state::Client;
use slirc_proto::{Message, Response, has_wildcards, irc_eq, wildcard_match};

pub struct LinkTraceReport {
    show_ip: bool,
}

impl LinkTraceReport {
    /// `L`: numeric addresses.
    pub const SHOW_IP: Self = Self { show_ip: true };
    /// `l`: hostnames.
    pub const HIDE_IP: Self = Self { show_ip: false };

    fn address_mode(&self, req: &StatsRequest<'_>, target: &Client) -> AddressMode {
        let by_case = if self.show_ip {
            AddressMode::Show
        } else {
            AddressMode::Hide
        };

        if req.viewer.is_local_oper()
            && (req.viewer.is_admin || (!target.is_server_link() && !target.modes.admin))
        {
            by_case
        } else if target.is_server_link() {
            AddressMode::Mask
        } else {
            by_case
        }
    }
}

/// How a target argument selects connections.
struct Selector<'a> {
    name: &'a str,
    /// Names this server: list everything.
    doall: bool,
    wilds: bool,
}

impl Selector<'_> {
    fn selects(&self, req: &StatsRequest<'_>, target: &Client) -> bool {
        if target.modes.invisible
            && (self.doall || self.wilds)
            && !req.viewer.is_local_oper()
            && !target.modes.oper
            && target.uid != req.viewer.uid
        {
            return false;
        }
        if self.doall {
            return true;
        }
        if self.wilds {
            wildcard_match(self.name, &target.name)
        } else {
            irc_eq(self.name, &target.name)
        }
    }
}

impl StatsReport for LinkTraceReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let Some(name) = req.target else {
            return vec![err_needmoreparams(req.me(), &req.viewer.nick, "STATS")];
        };

        let info = &req.matrix.server_info;
        let me = if req.viewer.is_local { &info.name } else { &info.sid };
        let selector = Selector {
            name,
            doall: irc_eq(name, me) || wildcard_match(name, me),
            wilds: has_wildcards(name),
        };

        let hide_server_ips = req.matrix.config.serverhide.hide_server_ips;
        let mut out = Vec::new();
        for tier in [
            req.matrix.unknowns(),
            req.matrix.local_users(),
            req.matrix.local_servers(),
        ] {
            for target in tier.iter().filter(|t| selector.selects(req, t)) {
                let caps = if target.is_server() {
                    target.capability_string()
                } else {
                    "-".to_string()
                };
                let display = client_name(target, self.address_mode(req, target), hide_server_ips);
                out.extend(link_info(req, target, display, &caps));
            }
        }
        out
    }
}

/// `RPL_STATSLINKINFO` for one local connection.
///
/// The trailing field is `age idle capabilities`.
pub(super) fn link_info(
    req: &StatsRequest<'_>,
    target: &Client,
    display: String,
    caps: &str,
) -> Option<Message> {
    let conn = target.connection.as_ref()?;
    Some(req.reply(
        Response::RPL_STATSLINKINFO,
        fields![
            display,
            conn.sendq,
            conn.send.messages,
            conn.send.bytes >> 10,
            conn.recv.messages,
            conn.recv.bytes >> 10,
            format!(
                "{} {} {}",
                elapsed(req.now, conn.firsttime),
                elapsed(req.now, conn.since),
                caps
            )
        ],
    ))
}
