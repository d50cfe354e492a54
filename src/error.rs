//! Unified error handling for slircd-stats.
//!
//! Handler errors carry enough information to produce the IRC reply the
//! requester should see and a static label for metrics.

use slirc_proto::Message;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::handlers::helpers::err_nosuchserver;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)] // Send variant is large but rarely constructed
pub enum HandlerError {
    #[error("no such server: {0}")]
    NoSuchServer(String),

    #[error("internal error: requester {0} is not a known client")]
    NickOrUserMissing(String),

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchServer(_) => "no_such_server",
            Self::NickOrUserMissing(_) => "nick_or_user_missing",
            Self::Send(_) => "send_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply
    /// (e.g., internal errors, send failures).
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> Option<Message> {
        match self {
            Self::NoSuchServer(target) => Some(err_nosuchserver(server_name, nick, target)),

            // These errors don't get client-visible replies
            Self::NickOrUserMissing(_) => None,
            Self::Send(_) => None,
            Self::Internal(_) => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use slirc_proto::Response;

    #[test]
    fn client_visible_errors_map_to_numerics() {
        let reply = HandlerError::NoSuchServer("nowhere.*".into())
            .to_irc_reply("irc.example.net", "bob")
            .unwrap();
        assert_eq!(reply.response(), Some(Response::ERR_NOSUCHSERVER));
        assert_eq!(reply.params()[1], "nowhere.*");
    }

    #[test]
    fn internal_errors_stay_silent() {
        let err = HandlerError::Internal("boom".into());
        assert!(err.to_irc_reply("s", "n").is_none());
        assert_eq!(err.error_code(), "internal_error");
    }
}
