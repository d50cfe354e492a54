//! Remote STATS routing.
//!
//! A target that names this server (by name, SID or a mask matching the
//! name) is answered locally. A target naming another server, or a user on
//! one, is relayed toward it over the link it sits behind.

use crate::metrics;
use crate::state::{Client, Matrix};
use slirc_proto::{Command, Message, Prefix, irc_eq, irc_to_lower, wildcard_match};
use tracing::{debug, warn};

/// Where a request should be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Local,
    /// Relay over the directly linked server named `via`.
    Forward { via: String },
    /// Nothing on the network matches the target.
    NoSuchServer(String),
}

/// Decide where a request for `target` is answered.
pub fn hunt_server(matrix: &Matrix, source: &Client, target: Option<&str>) -> Route {
    let Some(target) = target.filter(|t| !t.is_empty()) else {
        return Route::Local;
    };

    let me = &matrix.server_info;
    if irc_eq(target, &me.name) || irc_eq(target, &me.sid) || wildcard_match(target, &me.name) {
        return Route::Local;
    }

    let found = matrix
        .find_client(target)
        .filter(|c| !doubles_back(source, c, &me.name));
    if let Some(found) = found {
        if found.is_local() {
            return if found.is_server() {
                Route::Forward {
                    via: found.name.clone(),
                }
            } else {
                Route::Local
            };
        }
        return Route::Forward {
            via: uplink_of(&found, &me.name),
        };
    }

    let servers = matrix.clients_where(|c| {
        c.is_server() && wildcard_match(target, &c.name) && !doubles_back(source, c, &me.name)
    });
    if let Some(server) = servers.first() {
        let via = if server.is_local() {
            server.name.clone()
        } else {
            uplink_of(server, &me.name)
        };
        return Route::Forward { via };
    }

    debug!(uid = %source.uid, target = %target, "STATS target not found");
    Route::NoSuchServer(target.to_string())
}

/// A remote candidate reached over the link the request arrived on.
fn doubles_back(source: &Client, candidate: &Client, me: &str) -> bool {
    !source.is_local()
        && !candidate.is_local()
        && irc_eq(&uplink_of(candidate, me), &uplink_of(source, me))
}

/// Directly linked server a remote client is reached through.
fn uplink_of(client: &Client, me: &str) -> String {
    client
        .via
        .clone()
        .unwrap_or_else(|| client.server_name(me).to_string())
}

/// Relay `STATS <letter> <target>` to `via`, prefixed with the requester's UID.
///
/// The remote server answers the requester directly; nothing is sent back
/// from here.
pub async fn forward_stats(matrix: &Matrix, source: &Client, via: &str, letter: &str, target: &str) {
    let msg = Message {
        prefix: Some(Prefix::Id(source.uid.clone())),
        command: Command::STATS(letter.to_string(), Some(target.to_string())),
    };

    // Clone the sender out so the map guard is not held across the send.
    let link = matrix.links.get(&irc_to_lower(via)).map(|l| l.value().clone());
    let Some(link) = link else {
        warn!(link = %via, uid = %source.uid, "No route to link for STATS");
        return;
    };

    if link.send(msg).await.is_err() {
        warn!(link = %via, "Link closed while relaying STATS");
        return;
    }
    metrics::record_stats_forwarded();
    debug!(link = %via, letter = %letter, target = %target, "STATS relayed");
}
