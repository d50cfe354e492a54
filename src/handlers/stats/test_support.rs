//! Shared fixtures for the report unit tests.

use super::{StatsRequest, Viewer};
use crate::config::Config;
use crate::state::{Client, ClientKind, LocalConnection, Matrix, Traffic, UserModes};
use slirc_proto::Message;

pub const NOW: i64 = 1_700_000_000;

pub fn config() -> Config {
    toml::from_str(
        r#"
        [server]
        name = "irc.example.net"
        sid = "001"
        "#,
    )
    .unwrap()
}

pub fn matrix() -> Matrix {
    matrix_with(config())
}

pub fn matrix_with(config: Config) -> Matrix {
    Matrix::new(config, NOW - 86_400)
}

fn connection(ip: &str) -> LocalConnection {
    LocalConnection {
        ip: Some(ip.parse().unwrap()),
        sendq: 0,
        send: Traffic {
            messages: 10,
            bytes: 4096,
        },
        recv: Traffic {
            messages: 5,
            bytes: 2048,
        },
        firsttime: NOW - 3600,
        since: NOW - 10,
        lasttime: NOW - 60,
        last_privmsg: NOW - 120,
        ..Default::default()
    }
}

fn client(uid: &str, name: &str, kind: ClientKind) -> Client {
    Client {
        uid: uid.into(),
        name: name.into(),
        username: name.split('.').next().unwrap_or(name).into(),
        host: format!("{}.example.com", name),
        kind,
        modes: UserModes::default(),
        away: None,
        server: String::new(),
        via: None,
        service: false,
        capabilities: Vec::new(),
        connected_by: None,
        connection: None,
    }
}

/// Local registered user at 192.0.2.10.
pub fn user(uid: &str, nick: &str) -> Client {
    Client {
        connection: Some(connection("192.0.2.10")),
        ..client(uid, nick, ClientKind::User)
    }
}

/// Local operator, optionally an admin.
pub fn oper(uid: &str, nick: &str, admin: bool) -> Client {
    let mut c = user(uid, nick);
    c.modes.oper = true;
    c.modes.admin = admin;
    c.modes.snomasks = "y".into();
    if let Some(conn) = c.connection.as_mut() {
        conn.oper_privs = if admin { "AO".into() } else { "O".into() };
    }
    c
}

/// User on `server`, reached directly through that server's link.
pub fn remote_user(uid: &str, nick: &str, server: &str) -> Client {
    Client {
        server: server.into(),
        via: Some(server.into()),
        ..client(uid, nick, ClientKind::User)
    }
}

/// Directly linked server at 192.0.2.20.
pub fn server(uid: &str, name: &str) -> Client {
    Client {
        host: "192.0.2.20".into(),
        capabilities: vec!["EX".into(), "IE".into()],
        connection: Some(connection("192.0.2.20")),
        ..client(uid, name, ClientKind::Server)
    }
}

/// Server behind the link named `via`.
pub fn remote_server(uid: &str, name: &str, via: &str) -> Client {
    Client {
        server: via.into(),
        via: Some(via.into()),
        ..client(uid, name, ClientKind::Server)
    }
}

pub fn request<'a>(
    matrix: &'a Matrix,
    source: &'a Client,
    letter: char,
    target: Option<&'a str>,
) -> StatsRequest<'a> {
    StatsRequest {
        matrix,
        source,
        viewer: Viewer::of(source),
        letter,
        target,
        now: NOW,
    }
}

/// Parameters after the requester's nick, space-joined.
pub fn texts(lines: &[Message]) -> Vec<String> {
    lines
        .iter()
        .map(|m| m.params().get(1..).unwrap_or_default().join(" "))
        .collect()
}
