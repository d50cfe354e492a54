//! Integration test common infrastructure.
//!
//! Builds a populated [`Matrix`] from a TOML snapshot and drives STATS
//! requests through the real handler, capturing what the requester sees.

#![allow(dead_code)]

use slirc_proto::{Command, Message, Prefix, Response};
use slircd_stats::config::Config;
use slircd_stats::handlers::{Context, Handler, ResponseMiddleware, StatsHandler};
use slircd_stats::state::{Matrix, Snapshot};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Wall clock used for every request in the suite.
pub const NOW: i64 = 1_700_000_000;

pub const CONFIG: &str = r#"
    [server]
    name = "irc.example.net"
    sid = "001"
"#;

/// Three local users (one oper, one admin), a linked hub with a leaf behind
/// it, and a handful of configuration entries.
pub const SNAPSHOT: &str = r##"
    [me]
    since = 1699913600
    send = { messages = 500, bytes = 1048576 }
    recv = { messages = 400, bytes = 524288 }

    [[clients]]
    uid = "001AAAAAA"
    name = "alice"
    username = "alice"
    host = "alice.example.com"
    connection = { ip = "192.0.2.10", firsttime = 1699996400, since = 1699999990, lasttime = 1699999990, last_privmsg = 1699999880 }

    [[clients]]
    uid = "001AAAAAB"
    name = "bob"
    username = "bob"
    host = "bob.example.com"
    modes = { invisible = true }
    connection = { ip = "192.0.2.11", firsttime = 1699996400, since = 1699999990 }

    [[clients]]
    uid = "001AAAAAC"
    name = "root"
    username = "root"
    host = "staff.example.com"
    modes = { oper = true, snomasks = "y" }
    connection = { ip = "192.0.2.12", firsttime = 1699996400, since = 1699999990, last_privmsg = 1699999700, oper_privs = "O" }

    [[clients]]
    uid = "001AAAAAD"
    name = "boss"
    username = "boss"
    host = "staff.example.com"
    modes = { oper = true, admin = true }
    connection = { ip = "192.0.2.13", firsttime = 1699996400, since = 1699999990, last_privmsg = 1699999700, oper_privs = "AO" }

    [[clients]]
    uid = "002"
    name = "hub.example.net"
    username = "hub"
    host = "198.51.100.1"
    kind = "server"
    capabilities = ["EX", "IE"]
    connection = { ip = "198.51.100.1", firsttime = 1699996400, since = 1699999000, send = { messages = 10, bytes = 4096 }, recv = { messages = 20, bytes = 8192 } }

    [[clients]]
    uid = "003"
    name = "leaf.example.net"
    kind = "server"
    server = "hub.example.net"
    via = "hub.example.net"

    [[clients]]
    uid = "003AAAAAA"
    name = "far"
    username = "far"
    host = "far.example.org"
    server = "leaf.example.net"
    via = "hub.example.net"
    modes = { oper = true }

    [[channels]]
    name = "#ops"
    topic = "ops only"
    members = [{ uid = "001AAAAAC", modes = "o" }, { uid = "001AAAAAD", modes = "o" }]
    bans = [{ mask = "*!*@bad.example.com" }]

    [[conf.opers]]
    name = "root"
    user = "root"
    host = "staff.example.com"
    privs = "O"
    class = "opers"

    [[conf.connects]]
    name = "hub.example.net"
    host = "198.51.100.1"
    port = 6666
    class = "servers"
    tls = true

    [[conf.classes]]
    name = "opers"
    ping_freq = 90
    max_total = 10

    [[conf.klines]]
    user = "*"
    host = "*.example.com"
    reason = "temporary"
    until = 1700003600

    [tables]
    dns_servers = ["192.0.2.53"]

    [tables.connections]
    max_local_connections = 12
    max_local_clients = 9
    total_accepted = 340
"##;

pub fn config() -> Config {
    toml::from_str(CONFIG).expect("test config parses")
}

pub fn matrix_with(config: Config) -> Arc<Matrix> {
    let snapshot: Snapshot = toml::from_str(SNAPSHOT).expect("test snapshot parses");
    Arc::new(Matrix::from_snapshot(config, snapshot))
}

pub fn matrix() -> Arc<Matrix> {
    matrix_with(config())
}

/// Send `STATS <letter> [target]` as `uid` at [`NOW`] and collect the replies.
pub async fn stats(matrix: &Arc<Matrix>, uid: &str, letter: &str, target: Option<&str>) -> Vec<Message> {
    stats_at(matrix, uid, letter, target, NOW).await
}

pub async fn stats_at(
    matrix: &Arc<Matrix>,
    uid: &str,
    letter: &str,
    target: Option<&str>,
    now: i64,
) -> Vec<Message> {
    let msg = Message {
        prefix: Some(Prefix::Id(uid.to_string())),
        command: Command::STATS(letter.to_string(), target.map(str::to_string)),
    };
    let captured = Mutex::new(Vec::new());
    {
        let mut ctx = Context::new(uid, matrix, ResponseMiddleware::Capturing(&captured));
        ctx.now = now;
        StatsHandler
            .handle(&mut ctx, &msg)
            .await
            .expect("STATS handler succeeds");
    }
    captured.into_inner()
}

/// Numerics of the captured replies, in order.
pub fn codes(lines: &[Message]) -> Vec<Response> {
    lines.iter().filter_map(Message::response).collect()
}

/// Parameters after the requester's nick, space-joined.
pub fn texts(lines: &[Message]) -> Vec<String> {
    lines
        .iter()
        .map(|m| m.params().get(1..).unwrap_or_default().join(" "))
        .collect()
}

/// Register a sender for `uid` and return its receiving end.
pub fn listen(matrix: &Matrix, uid: &str) -> mpsc::Receiver<Message> {
    let (tx, rx) = mpsc::channel(16);
    matrix.register_sender(uid, tx);
    rx
}

/// Register a link to `name` and return its receiving end.
pub fn link(matrix: &Matrix, name: &str) -> mpsc::Receiver<Message> {
    let (tx, rx) = mpsc::channel(16);
    matrix.register_link(name, tx);
    rx
}
