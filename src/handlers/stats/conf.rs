//! Reports listing configuration entries and bans.

use super::gate::{Visibility, refused};
use super::{StatsReport, StatsRequest};
use crate::state::{AuthBlock, ConfStore, KLine, ShareType};
use slirc_proto::{Message, Response};

/// Class name for a block, falling back when the class is not defined.
fn class_name<'a>(conf: &'a ConfStore, name: &str) -> &'a str {
    conf.class(name).map_or("default", |c| c.name.as_str())
}

/// `o`/`O`: operator blocks.
pub struct OperReport;

impl StatsReport for OperReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        if refused(&req.viewer, req.matrix.config.stats.stats_o_oper_only) {
            return vec![req.no_privileges()];
        }

        let conf = req.matrix.conf.read();
        conf.opers
            .iter()
            .map(|o| {
                let privs = if req.viewer.is_oper && !o.privs.is_empty() {
                    o.privs.as_str()
                } else {
                    "0"
                };
                req.reply(
                    Response::RPL_STATSOLINE,
                    fields![
                        'O',
                        format!("{}@{}", o.user, o.host),
                        '*',
                        o.name,
                        privs,
                        class_name(&conf, &o.class)
                    ],
                )
            })
            .collect()
    }
}

/// `c`/`C`: connect blocks.
pub struct ConnectReport;

impl StatsReport for ConnectReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let show_host = req.viewer.is_admin && !req.matrix.config.serverhide.hide_server_ips;
        let conf = req.matrix.conf.read();

        conf.connects
            .iter()
            .map(|c| {
                let mut flags = String::new();
                if c.autoconnect {
                    flags.push('A');
                }
                if c.tls {
                    flags.push('S');
                }
                if flags.is_empty() {
                    flags.push('*');
                }
                let host = if show_host { c.host.as_str() } else { "*@127.0.0.1" };
                req.reply(
                    Response::RPL_STATSCLINE,
                    fields!['C', host, flags, c.name, c.port, class_name(&conf, &c.class)],
                )
            })
            .collect()
    }
}

/// `i`/`I`: auth blocks.
pub struct AuthReport;

impl AuthReport {
    /// Flag characters followed by the user mask.
    fn prefixed_user(req: &StatsRequest<'_>, auth: &AuthBlock) -> String {
        let f = &auth.flags;
        let mut out = String::new();
        if f.webirc {
            out.push('<');
        }
        if f.no_tilde {
            out.push('-');
        }
        if f.need_ident {
            out.push('+');
        }
        if !f.need_password {
            out.push('&');
        }
        if f.exempt_resv {
            out.push('$');
        }
        if f.spoof {
            out.push('=');
        }
        if req.viewer.is_oper {
            if f.exempt_kline {
                out.push('^');
            }
            if f.exempt_xline {
                out.push('!');
            }
            if f.exempt_limits {
                out.push('>');
            }
        }
        if f.can_flood {
            out.push('|');
        }
        out.push_str(&auth.user);
        out
    }

    fn line(req: &StatsRequest<'_>, conf: &ConfStore, auth: &AuthBlock, name: &str) -> Message {
        req.reply(
            Response::RPL_STATSILINE,
            fields![
                'I',
                name,
                '*',
                format!("{}@{}", Self::prefixed_user(req, auth), auth.host),
                auth.port,
                class_name(conf, &auth.class)
            ],
        )
    }
}

impl StatsReport for AuthReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        match Visibility::of(&req.viewer, req.matrix.config.stats.stats_i_oper_only) {
            Visibility::Denied => vec![req.no_privileges()],
            Visibility::OwnEntry => {
                let conn = req.source.connection.as_ref();
                conf.find_auth(
                    &req.source.username,
                    &req.source.host,
                    conn.and_then(|c| c.ip),
                    conn.and_then(|c| c.password.as_deref()),
                )
                .map(|auth| Self::line(req, &conf, auth, "*"))
                .into_iter()
                .collect()
            }
            Visibility::Full => conf
                .auths
                .iter()
                .filter(|a| req.viewer.is_oper || !a.flags.spoof)
                .map(|a| Self::line(req, &conf, a, a.name.as_deref().unwrap_or("*")))
                .collect(),
        }
    }
}

/// `k` (temporary) and `K` (permanent) K-lines.
pub struct KlineReport {
    temporary: bool,
}

impl KlineReport {
    pub const TEMPORARY: Self = Self { temporary: true };
    pub const PERMANENT: Self = Self { temporary: false };

    fn wanted(&self, k: &KLine) -> bool {
        k.until.is_some() == self.temporary
    }

    fn line(&self, req: &StatsRequest<'_>, k: &KLine) -> Message {
        let marker = if self.temporary { 'k' } else { 'K' };
        req.reply(
            Response::RPL_STATSKLINE,
            fields![marker, k.host, k.user, k.reason],
        )
    }
}

impl StatsReport for KlineReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        match Visibility::of(&req.viewer, req.matrix.config.stats.stats_k_oper_only) {
            Visibility::Denied => vec![req.no_privileges()],
            Visibility::OwnEntry => {
                let ip = req.source.connection.as_ref().and_then(|c| c.ip);
                conf.find_kline(&req.source.username, &req.source.host, ip)
                    .filter(|k| self.wanted(k))
                    .map(|k| self.line(req, k))
                    .into_iter()
                    .collect()
            }
            Visibility::Full => conf
                .klines
                .iter()
                .filter(|k| self.wanted(k))
                .map(|k| self.line(req, k))
                .collect(),
        }
    }
}

/// `d` (temporary) and `D` (permanent) D-lines.
pub struct DlineReport {
    temporary: bool,
}

impl DlineReport {
    pub const TEMPORARY: Self = Self { temporary: true };
    pub const PERMANENT: Self = Self { temporary: false };
}

impl StatsReport for DlineReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let marker = if self.temporary { 'd' } else { 'D' };
        let conf = req.matrix.conf.read();
        conf.dlines
            .iter()
            .filter(|d| d.until.is_some() == self.temporary)
            .map(|d| req.reply(Response::RPL_STATSDLINE, fields![marker, d.host, d.reason]))
            .collect()
    }
}

/// `e`: D-line exemptions.
pub struct ExemptReport;

impl StatsReport for ExemptReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        if req.matrix.config.stats.stats_e_disabled {
            return vec![req.no_privileges()];
        }
        let conf = req.matrix.conf.read();
        conf.exempts
            .iter()
            .map(|e| req.reply(Response::RPL_STATSDLINE, fields!['e', e.host, ""]))
            .collect()
    }
}

/// `q`/`Q`: reserved channels, then reserved nicks.
pub struct ResvReport;

impl StatsReport for ResvReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        conf.resv_channels
            .iter()
            .chain(&conf.resv_nicks)
            .map(|r| {
                let marker = if r.expire.is_some() { 'q' } else { 'Q' };
                req.reply(Response::RPL_STATSQLINE, fields![marker, r.mask, r.reason])
            })
            .collect()
    }
}

/// `x`/`X`: realname bans.
pub struct GecosReport;

impl StatsReport for GecosReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        conf.gecos
            .iter()
            .map(|g| {
                let marker = if g.expire.is_some() { 'x' } else { 'X' };
                req.reply(Response::RPL_STATSXLINE, fields![marker, g.mask, g.reason])
            })
            .collect()
    }
}

/// `s`/`S`: services servers.
pub struct ServiceReport;

impl StatsReport for ServiceReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        conf.services
            .iter()
            .map(|s| req.reply(Response::RPL_STATSSERVICE, fields!['S', '*', s.name, 0, 0]))
            .collect()
    }
}

/// `U`: shared and cluster blocks.
pub struct SharedReport;

impl SharedReport {
    fn flags(lead: char, types: &[ShareType]) -> String {
        let mut out = String::from(lead);
        for (ty, letter) in ShareType::ALL {
            out.push(if types.contains(&ty) {
                letter
            } else {
                letter.to_ascii_lowercase()
            });
        }
        out
    }
}

impl StatsReport for SharedReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        let shared = conf.shared.iter().map(|s| {
            req.reply(
                Response::RPL_STATSULINE,
                fields![
                    s.server,
                    format!("{}@{}", s.user, s.host),
                    Self::flags('c', &s.types)
                ],
            )
        });
        let clusters = conf.clusters.iter().map(|c| {
            req.reply(
                Response::RPL_STATSULINE,
                fields![c.server, "*@*", Self::flags('C', &c.types)],
            )
        });
        shared.chain(clusters).collect()
    }
}

/// `y`/`Y`: connection classes.
pub struct ClassReport;

impl StatsReport for ClassReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        conf.classes
            .iter()
            .map(|c| {
                req.reply(
                    Response::RPL_STATSYLINE,
                    fields![
                        'Y',
                        c.name,
                        c.ping_freq,
                        c.con_freq,
                        c.max_total,
                        c.max_sendq,
                        c.max_recvq,
                        c.ref_count,
                        format!("{}/{}", c.number_per_cidr, c.cidr_bitlen_ipv4),
                        format!("{}/{}", c.number_per_cidr, c.cidr_bitlen_ipv6),
                        if c.active { "active" } else { "disabled" }
                    ],
                )
            })
            .collect()
    }
}

/// `h`/`H`: hub and leaf masks of connect blocks.
pub struct HubLeafReport;

impl StatsReport for HubLeafReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let conf = req.matrix.conf.read();
        let mut out = Vec::new();
        for c in &conf.connects {
            for mask in &c.hub_masks {
                out.push(req.reply(
                    Response::RPL_STATSHLINE,
                    fields!['H', mask, '*', c.name, 0, '*'],
                ));
            }
        }
        for c in &conf.connects {
            for mask in &c.leaf_masks {
                out.push(req.reply(
                    Response::RPL_STATSLLINE,
                    fields!['L', mask, '*', c.name, 0, '*'],
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OperOnly;
    use crate::handlers::stats::test_support::{
        NOW, config, matrix, matrix_with, oper, request, texts, user,
    };
    use crate::state::{
        AuthBlock, AuthFlags, Class, ClusterBlock, ConnectBlock, KLine, OperBlock, Resv,
        SharedBlock,
    };

    fn conf_matrix(cfg: crate::config::Config) -> crate::state::Matrix {
        let m = matrix_with(cfg);
        {
            let mut conf = m.conf.write();
            conf.classes.push(Class {
                name: "users".into(),
                ping_freq: 90,
                con_freq: 0,
                max_total: 100,
                max_sendq: 1000,
                max_recvq: 500,
                ref_count: 2,
                number_per_cidr: 4,
                cidr_bitlen_ipv4: 24,
                cidr_bitlen_ipv6: 64,
                active: true,
            });
            conf.opers.push(OperBlock {
                name: "root".into(),
                user: "*".into(),
                host: "*.example.com".into(),
                privs: "AO".into(),
                class: "users".into(),
            });
            conf.connects.push(ConnectBlock {
                name: "hub.example.net".into(),
                host: "198.51.100.1".into(),
                port: 6666,
                class: "servers".into(),
                autoconnect: true,
                tls: false,
                hub_masks: vec!["*".into()],
                leaf_masks: vec!["leaf.*".into()],
            });
            conf.auths.push(AuthBlock {
                name: None,
                user: "*".into(),
                host: "*.example.com".into(),
                port: 0,
                class: "users".into(),
                password: None,
                flags: AuthFlags {
                    exempt_kline: true,
                    can_flood: true,
                    ..Default::default()
                },
            });
            conf.auths.push(AuthBlock {
                name: Some("spoofed".into()),
                user: "*".into(),
                host: "198.51.100.*".into(),
                port: 0,
                class: "users".into(),
                password: Some("secret".into()),
                flags: AuthFlags {
                    need_password: true,
                    spoof: true,
                    ..Default::default()
                },
            });
            conf.klines.push(KLine {
                user: "*".into(),
                host: "*.example.com".into(),
                reason: "go away".into(),
                until: Some(NOW + 60),
            });
            conf.klines.push(KLine {
                user: "bad".into(),
                host: "*".into(),
                reason: "forever".into(),
                until: None,
            });
            conf.resv_nicks.push(Resv {
                mask: "NickServ".into(),
                reason: "services".into(),
                expire: None,
            });
            conf.resv_channels.push(Resv {
                mask: "#warez".into(),
                reason: "no".into(),
                expire: Some(10),
            });
            conf.shared.push(SharedBlock {
                server: "hub.example.net".into(),
                user: "*".into(),
                host: "*".into(),
                types: vec![ShareType::Kline, ShareType::Dline],
            });
            conf.clusters.push(ClusterBlock {
                server: "*".into(),
                types: vec![ShareType::Resv],
            });
        }
        m
    }

    #[test]
    fn oper_privs_hidden_from_users() {
        let m = conf_matrix(config());
        let alice = user("001AAAAAA", "alice");
        let root = oper("001AAAAAB", "root", false);

        let lines = OperReport.render(&request(&m, &alice, 'o', None));
        assert_eq!(texts(&lines), ["O *@*.example.com * root 0 users"]);

        let lines = OperReport.render(&request(&m, &root, 'o', None));
        assert_eq!(texts(&lines), ["O *@*.example.com * root AO users"]);
    }

    #[test]
    fn connect_host_needs_admin() {
        let m = conf_matrix(config());
        let root = oper("001AAAAAB", "root", false);
        let admin = oper("001AAAAAC", "boss", true);

        let lines = ConnectReport.render(&request(&m, &root, 'c', None));
        assert_eq!(texts(&lines), ["C *@127.0.0.1 A hub.example.net 6666 default"]);

        let lines = ConnectReport.render(&request(&m, &admin, 'c', None));
        assert_eq!(texts(&lines), ["C 198.51.100.1 A hub.example.net 6666 default"]);
    }

    #[test]
    fn connect_host_hidden_from_admins_when_configured() {
        let mut cfg = config();
        cfg.serverhide.hide_server_ips = true;
        let m = conf_matrix(cfg);
        let admin = oper("001AAAAAC", "boss", true);

        let lines = ConnectReport.render(&request(&m, &admin, 'C', None));
        assert!(texts(&lines)[0].contains("*@127.0.0.1"));
    }

    #[test]
    fn auth_masked_shows_own_block() {
        let m = conf_matrix(config());
        let alice = user("001AAAAAA", "alice");

        let lines = AuthReport.render(&request(&m, &alice, 'i', None));
        assert_eq!(texts(&lines), ["I * * &|*@*.example.com 0 users"]);
    }

    #[test]
    fn auth_full_listing_for_opers() {
        let m = conf_matrix(config());
        let root = oper("001AAAAAB", "root", false);

        let lines = AuthReport.render(&request(&m, &root, 'I', None));
        assert_eq!(
            texts(&lines),
            [
                "I * * &^|*@*.example.com 0 users",
                "I spoofed * =*@198.51.100.* 0 users",
            ]
        );
    }

    #[test]
    fn auth_policy_no_hides_spoofs_from_users() {
        let mut cfg = config();
        cfg.stats.stats_i_oper_only = OperOnly::No;
        let m = conf_matrix(cfg);
        let alice = user("001AAAAAA", "alice");

        let lines = AuthReport.render(&request(&m, &alice, 'i', None));
        assert_eq!(texts(&lines), ["I * * &|*@*.example.com 0 users"]);
    }

    #[test]
    fn auth_policy_yes_refuses_users() {
        let mut cfg = config();
        cfg.stats.stats_i_oper_only = OperOnly::Yes;
        let m = conf_matrix(cfg);
        let alice = user("001AAAAAA", "alice");

        let lines = AuthReport.render(&request(&m, &alice, 'i', None));
        assert_eq!(lines[0].response(), Some(Response::ERR_NOPRIVILEGES));
    }

    #[test]
    fn klines_split_by_duration() {
        let m = conf_matrix(config());
        let root = oper("001AAAAAB", "root", false);

        let lines = KlineReport::TEMPORARY.render(&request(&m, &root, 'k', None));
        assert_eq!(texts(&lines), ["k *.example.com * go away"]);

        let lines = KlineReport::PERMANENT.render(&request(&m, &root, 'K', None));
        assert_eq!(texts(&lines), ["K * bad forever"]);
    }

    #[test]
    fn masked_kline_shows_only_own_match() {
        let m = conf_matrix(config());
        let alice = user("001AAAAAA", "alice");

        let lines = KlineReport::TEMPORARY.render(&request(&m, &alice, 'k', None));
        assert_eq!(texts(&lines), ["k *.example.com * go away"]);

        // The matching K-line is temporary, so the permanent listing is empty.
        let lines = KlineReport::PERMANENT.render(&request(&m, &alice, 'K', None));
        assert!(lines.is_empty());
    }

    #[test]
    fn resv_lists_channels_before_nicks() {
        let m = conf_matrix(config());
        let root = oper("001AAAAAB", "root", false);

        let lines = ResvReport.render(&request(&m, &root, 'q', None));
        assert_eq!(texts(&lines), ["q #warez no", "Q NickServ services"]);
    }

    #[test]
    fn shared_flags_follow_fixed_order() {
        let m = conf_matrix(config());
        let root = oper("001AAAAAB", "root", false);

        let lines = SharedReport.render(&request(&m, &root, 'U', None));
        assert_eq!(
            texts(&lines),
            [
                "hub.example.net *@* cKuxyqrlDe",
                "* *@* CkuxyQrlde",
            ]
        );
    }

    #[test]
    fn class_line_format() {
        let m = conf_matrix(config());
        let root = oper("001AAAAAB", "root", false);

        let lines = ClassReport.render(&request(&m, &root, 'y', None));
        assert_eq!(
            texts(&lines),
            ["Y users 90 0 100 1000 500 2 4/24 4/64 active"]
        );
    }

    #[test]
    fn hub_and_leaf_masks() {
        let m = conf_matrix(config());
        m.conf.write().connects.push(ConnectBlock {
            name: "b.example.net".into(),
            host: "198.51.100.2".into(),
            port: 6666,
            class: "servers".into(),
            autoconnect: false,
            tls: false,
            hub_masks: vec!["*.hub".into()],
            leaf_masks: vec!["*.leaf".into()],
        });
        let root = oper("001AAAAAB", "root", false);

        let lines = HubLeafReport.render(&request(&m, &root, 'h', None));
        assert_eq!(lines[0].response(), Some(Response::RPL_STATSHLINE));
        assert_eq!(lines[2].response(), Some(Response::RPL_STATSLLINE));
        assert_eq!(
            texts(&lines),
            [
                "H * * hub.example.net 0 *",
                "H *.hub * b.example.net 0 *",
                "L leaf.* * hub.example.net 0 *",
                "L *.leaf * b.example.net 0 *",
            ]
        );
    }

    #[test]
    fn exempt_listing_can_be_disabled() {
        let mut cfg = config();
        cfg.stats.stats_e_disabled = true;
        let m = matrix_with(cfg);
        let root = oper("001AAAAAB", "root", false);

        let lines = ExemptReport.render(&request(&m, &root, 'e', None));
        assert_eq!(lines[0].response(), Some(Response::ERR_NOPRIVILEGES));

        let m = matrix();
        m.conf.write().exempts.push(crate::state::Exempt {
            host: "192.0.2.0/24".into(),
        });
        let lines = ExemptReport.render(&request(&m, &root, 'e', None));
        assert_eq!(lines[0].params(), ["root", "e", "192.0.2.0/24", ""]);
    }
}
