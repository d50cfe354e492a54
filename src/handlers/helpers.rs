//! Helper functions for IRC command handlers.
//!
//! Common reply builders plus the duration and size formatting shared by the
//! STATS reports.

use slirc_proto::{Message, Prefix, Response};

// ============================================================================
// Common reply helpers
// ============================================================================

/// Helper to create a server reply message (numeric response).
pub fn server_reply(server_name: &str, response: Response, params: Vec<String>) -> Message {
    Message {
        prefix: Some(Prefix::ServerName(server_name.to_string())),
        command: slirc_proto::Command::Response(response, params),
    }
}

/// Create ERR_NOPRIVILEGES reply (481) - user is not an IRC operator.
pub fn err_noprivileges(server_name: &str, nick: &str) -> Message {
    server_reply(
        server_name,
        Response::ERR_NOPRIVILEGES,
        vec![
            nick.to_string(),
            "Permission Denied - You're not an IRC operator".to_string(),
        ],
    )
}

/// Create ERR_NEEDMOREPARAMS reply (461) - not enough parameters.
pub fn err_needmoreparams(server_name: &str, nick: &str, command: &str) -> Message {
    server_reply(
        server_name,
        Response::ERR_NEEDMOREPARAMS,
        vec![
            nick.to_string(),
            command.to_string(),
            "Not enough parameters".to_string(),
        ],
    )
}

/// Create ERR_NOSUCHSERVER reply (402) - no such server.
pub fn err_nosuchserver(server_name: &str, nick: &str, target: &str) -> Message {
    server_reply(
        server_name,
        Response::ERR_NOSUCHSERVER,
        vec![
            nick.to_string(),
            target.to_string(),
            "No such server".to_string(),
        ],
    )
}

/// Create RPL_LOAD2HI reply (263) - command refused, try again later.
pub fn rpl_load2hi(server_name: &str, nick: &str, command: &str) -> Message {
    server_reply(
        server_name,
        Response::RPL_LOAD2HI,
        vec![
            nick.to_string(),
            command.to_string(),
            "Server load is temporarily too heavy. Please wait a while and try again.".to_string(),
        ],
    )
}

// ============================================================================
// Formatting
// ============================================================================

/// Render a duration as `N days, HH:MM:SS` ("1 day" in the singular).
pub fn time_dissect(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!(
        "{} day{}, {:02}:{:02}:{:02}",
        days,
        if days == 1 { "" } else { "s" },
        hours,
        minutes,
        seconds
    )
}

/// Scale a kilobyte count to the largest unit that keeps it above one.
pub fn scale_kb(kb: u64) -> (f64, &'static str) {
    const MB: u64 = 1024;
    const GB: u64 = 1024 * 1024;
    const TB: u64 = 1024 * 1024 * 1024;

    let kb_f = kb as f64;
    if kb > TB {
        (kb_f / TB as f64, "Terabytes")
    } else if kb > GB {
        (kb_f / GB as f64, "Gigabytes")
    } else if kb > MB {
        (kb_f / MB as f64, "Megabytes")
    } else {
        (kb_f, "Kilobytes")
    }
}

/// Seconds from `then` to `now`, clamped at zero.
#[inline]
pub fn elapsed(now: i64, then: i64) -> u64 {
    u64::try_from(now.saturating_sub(then)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_dissect_formats() {
        assert_eq!(time_dissect(0), "0 days, 00:00:00");
        assert_eq!(time_dissect(86400 + 3661), "1 day, 01:01:01");
        assert_eq!(time_dissect(3 * 86400 + 59), "3 days, 00:00:59");
    }

    #[test]
    fn scale_kb_picks_unit() {
        assert_eq!(scale_kb(512), (512.0, "Kilobytes"));
        assert_eq!(scale_kb(1024), (1024.0, "Kilobytes"));
        assert_eq!(scale_kb(2048), (2.0, "Megabytes"));
        assert_eq!(scale_kb(3 * 1024 * 1024), (3.0, "Gigabytes"));
        assert_eq!(scale_kb(5 * 1024 * 1024 * 1024), (5.0, "Terabytes"));
    }

    #[test]
    fn elapsed_never_negative() {
        assert_eq!(elapsed(10, 4), 6);
        assert_eq!(elapsed(4, 10), 0);
    }

    #[test]
    fn reply_carries_server_prefix() {
        let msg = err_noprivileges("irc.example.net", "bob");
        assert_eq!(
            msg.to_string(),
            ":irc.example.net 481 bob :Permission Denied - You're not an IRC operator\r\n"
        );
    }
}
