//! Reports on live server state: traffic, uptime, listeners, operators.

use super::gate::refused;
use super::ltrace::link_info;
use super::{AddressMode, StatsReport, StatsRequest, client_name};
use crate::handlers::helpers::{elapsed, scale_kb, time_dissect};
use slirc_proto::{Message, Response};
use std::net::IpAddr;
use tracing::debug;

/// `a`/`A`: configured DNS servers.
pub struct DnsReport;

impl StatsReport for DnsReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let tables = req.matrix.tables.read();
        tables
            .dns_servers
            .iter()
            .filter_map(|s| match s.parse::<IpAddr>() {
                Ok(ip) => Some(req.reply(Response::RPL_STATSALINE, fields![ip])),
                Err(_) => {
                    debug!(entry = %s, "Skipping unparseable DNS server");
                    None
                }
            })
            .collect()
    }
}

/// `E`: scheduled events.
pub struct EventReport;

impl StatsReport for EventReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let tables = req.matrix.tables.read();
        let mut out = vec![
            req.debug('E', "Operation                      Next Execution".to_string()),
            req.debug('E', "-".repeat(45)),
        ];
        out.extend(tables.events.iter().map(|ev| {
            req.debug(
                'E',
                format!("{:<30} {:<4} seconds", ev.name, ev.next - req.now),
            )
        }));
        out
    }
}

/// `f`/`F`: open descriptors.
pub struct FdReport;

impl StatsReport for FdReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let tables = req.matrix.tables.read();
        tables
            .fds
            .iter()
            .map(|f| req.debug('F', format!("fd {:<5} desc '{}'", f.fd, f.desc)))
            .collect()
    }
}

/// `T`: MOTD bindings.
pub struct MotdReport;

impl StatsReport for MotdReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let tables = req.matrix.tables.read();
        tables
            .motds
            .iter()
            .map(|m| req.debug('T', format!("MOTD {} {}", m.mask, m.path)))
            .collect()
    }
}

/// `u`: uptime and connection high-water marks.
pub struct UptimeReport;

impl StatsReport for UptimeReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let cfg = &req.matrix.config;
        if refused(&req.viewer, cfg.stats.stats_u_oper_only) {
            return vec![req.no_privileges()];
        }

        let up = elapsed(req.now, req.matrix.server_info.since);
        let mut out = vec![req.reply(
            Response::RPL_STATSUPTIME,
            fields![format!("Server Up {}", time_dissect(up))],
        )];

        if !cfg.serverhide.disable_remote_commands || req.viewer.is_oper {
            let tables = req.matrix.tables.read();
            let counts = &tables.connections;
            out.push(req.reply(
                Response::RPL_STATSCONN,
                fields![format!(
                    "Highest connection count: {} ({} clients) ({} connections received)",
                    counts.max_local_connections, counts.max_local_clients, counts.total_accepted
                )],
            ));
        }
        out
    }
}

/// `t`: cumulative traffic counters, historical plus live connections.
pub struct TrafficReport;

impl StatsReport for TrafficReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let mut sp = req.matrix.tables.read().counters.clone();

        for server in req.matrix.local_servers() {
            let Some(conn) = server.connection.as_ref() else {
                continue;
            };
            sp.servers += 1;
            sp.server_bytes_sent += conn.send.bytes;
            sp.server_bytes_recv += conn.recv.bytes;
            sp.server_time += elapsed(req.now, conn.firsttime);
        }
        for user in req.matrix.local_users() {
            let Some(conn) = user.connection.as_ref() else {
                continue;
            };
            sp.clients += 1;
            sp.client_bytes_sent += conn.send.bytes;
            sp.client_bytes_recv += conn.recv.bytes;
            sp.client_time += elapsed(req.now, conn.firsttime);
        }
        let unknowns = u32::try_from(req.matrix.unknowns().len()).unwrap_or(u32::MAX);
        sp.unknown_closes = sp.unknown_closes.saturating_add(unknowns);

        [
            format!("accepts {} refused {}", sp.accepts, sp.refused),
            format!(
                "unknown commands {} prefixes {}",
                sp.unknown_commands, sp.unknown_prefixes
            ),
            format!(
                "nick collisions {} unknown closes {}",
                sp.nick_collisions, sp.unknown_closes
            ),
            format!("wrong direction {} empty {}", sp.wrong_direction, sp.empty),
            format!("numerics seen {}", sp.numerics),
            format!(
                "auth successes {} fails {}",
                sp.auth_successes, sp.auth_fails
            ),
            "Client Server".to_string(),
            format!("connected {} {}", sp.clients, sp.servers),
            format!(
                "bytes sent {} {}",
                sp.client_bytes_sent, sp.server_bytes_sent
            ),
            format!(
                "bytes recv {} {}",
                sp.client_bytes_recv, sp.server_bytes_recv
            ),
            format!("time connected {} {}", sp.client_time, sp.server_time),
        ]
        .into_iter()
        .map(|line| req.debug('t', line))
        .collect()
    }
}

/// `v`: directly linked servers and their idle time.
pub struct ServerReport;

impl StatsReport for ServerReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let servers = req.matrix.local_servers();
        let mut out: Vec<Message> = servers
            .iter()
            .filter_map(|s| {
                let conn = s.connection.as_ref()?;
                Some(req.debug(
                    'v',
                    format!(
                        "{} ({}!*@*) Idle: {}",
                        s.name,
                        s.connected_by.as_deref().unwrap_or("Remote."),
                        time_dissect(elapsed(req.now, conn.lasttime))
                    ),
                ))
            })
            .collect();
        out.push(req.debug('v', format!("{} Server(s)", servers.len())));
        out
    }
}

/// `m`/`M`: command usage counters.
pub struct MessageReport;

impl StatsReport for MessageReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        if refused(&req.viewer, req.matrix.config.stats.stats_m_oper_only) {
            return vec![req.no_privileges()];
        }
        let tables = req.matrix.tables.read();
        tables
            .command_stats()
            .into_iter()
            .map(|c| {
                req.reply(
                    Response::RPL_STATSCOMMANDS,
                    fields![c.name, c.count, c.bytes, c.remote_count],
                )
            })
            .collect()
    }
}

/// `p`: operators connected here.
pub struct OperedUpReport;

impl StatsReport for OperedUpReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let viewer = &req.viewer;
        let mut out = Vec::new();

        for target in req.matrix.local_opers() {
            if target.modes.hidden && !viewer.is_oper {
                continue;
            }
            let Some(conn) = target.connection.as_ref() else {
                continue;
            };

            let idle = if viewer.is_oper || !target.modes.hide_idle {
                time_dissect(elapsed(req.now, conn.last_privmsg))
            } else {
                "n/a".to_string()
            };
            let level = if target.modes.admin { 'A' } else { 'O' };
            let text = if viewer.is_local_oper() {
                format!(
                    "[{}][{}] {} ({}@{}) Idle: {}",
                    level, conn.oper_privs, target.name, target.username, target.host, idle
                )
            } else {
                format!(
                    "[{}] {} ({}@{}) Idle: {}",
                    level, target.name, target.username, target.host, idle
                )
            };
            out.push(req.debug('p', text));
        }

        let count = out.len();
        out.push(req.debug('p', format!("{} OPER(s)", count)));
        out
    }
}

/// `P`: listening ports.
pub struct PortReport;

impl StatsReport for PortReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let viewer = &req.viewer;
        let cfg = &req.matrix.config;
        if refused(viewer, cfg.stats.stats_p_oper_only) {
            return vec![req.no_privileges()];
        }

        let show_name =
            viewer.is_admin && (viewer.is_local || !cfg.serverhide.hide_server_ips);
        let tables = req.matrix.tables.read();

        tables
            .listeners
            .iter()
            .filter(|l| !l.hidden || viewer.is_admin)
            .map(|l| {
                let mut flags = String::new();
                if l.hidden {
                    flags.push('H');
                }
                if l.server {
                    flags.push('S');
                }
                if l.tls {
                    flags.push('s');
                }
                let name = if show_name { l.name.as_str() } else { req.me() };
                req.reply(
                    Response::RPL_STATSPLINE,
                    fields![
                        'P',
                        l.port,
                        name,
                        l.ref_count,
                        flags,
                        if l.active { "active" } else { "disabled" }
                    ],
                )
            })
            .collect()
    }
}

/// `?`: directly linked servers with traffic totals.
pub struct ServLinksReport;

impl StatsReport for ServLinksReport {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message> {
        let viewer = &req.viewer;
        let hide = &req.matrix.config.serverhide;
        if hide.flatten_links && !viewer.is_oper {
            return vec![req.no_privileges()];
        }

        let mode = if viewer.is_admin {
            AddressMode::Show
        } else {
            AddressMode::Mask
        };
        let servers = req.matrix.local_servers();
        let (mut sent, mut recv) = (0u64, 0u64);
        let mut out = Vec::new();

        for target in &servers {
            if target.service && hide.hide_services && !viewer.is_oper {
                continue;
            }
            if let Some(conn) = target.connection.as_ref() {
                sent += conn.send.bytes;
                recv += conn.recv.bytes;
            }
            let caps = if viewer.is_oper {
                target.capability_string()
            } else {
                "TS".to_string()
            };
            let display = client_name(target, mode, hide.hide_server_ips);
            out.extend(link_info(req, target, display, &caps));
        }

        let (sent_v, sent_unit) = scale_kb(sent >> 10);
        let (recv_v, recv_unit) = scale_kb(recv >> 10);
        out.push(req.debug('?', format!("{} total server(s)", servers.len())));
        out.push(req.debug('?', format!("Sent total: {:7.2} {}", sent_v, sent_unit)));
        out.push(req.debug('?', format!("Recv total: {:7.2} {}", recv_v, recv_unit)));

        let info = &req.matrix.server_info;
        let uptime = elapsed(req.now, info.since).max(1) as f64;
        let me_sent = info.send.bytes >> 10;
        let me_recv = info.recv.bytes >> 10;
        let (v, unit) = scale_kb(me_sent);
        out.push(req.debug(
            '?',
            format!(
                "Server send: {:7.2} {} ({:4.1} K/s)",
                v,
                unit,
                me_sent as f64 / uptime
            ),
        ));
        let (v, unit) = scale_kb(me_recv);
        out.push(req.debug(
            '?',
            format!(
                "Server recv: {:7.2} {} ({:4.1} K/s)",
                v,
                unit,
                me_recv as f64 / uptime
            ),
        ));
        out
    }
}
