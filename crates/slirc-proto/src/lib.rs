//! # slirc-proto
//!
//! The IRC line model used by the slircd STATS subsystem.
//!
//! ## Features
//!
//! - Numeric reply codes for every STATS report and its error paths
//! - Owned [`Message`] with a server or user [`Prefix`] and IRC serialization
//! - RFC 1459 casemapping ([`irc_to_lower`], [`irc_eq`])
//! - Glob-style mask matching ([`wildcard_match`], [`has_wildcards`])
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_proto::{Command, Message, Prefix, Response};
//!
//! let end = Message {
//!     prefix: Some(Prefix::ServerName("irc.example.net".into())),
//!     command: Command::Response(
//!         Response::RPL_ENDOFSTATS,
//!         vec!["alice".into(), "u".into(), "End of /STATS report".into()],
//!     ),
//! };
//!
//! assert_eq!(
//!     end.to_string(),
//!     ":irc.example.net 219 alice u :End of /STATS report\r\n"
//! );
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod command;
pub mod error;
pub mod message;
pub mod prefix;
pub mod response;
pub mod util;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::command::Command;
pub use self::error::ResponseParseError;
pub use self::message::Message;
pub use self::prefix::Prefix;
pub use self::response::Response;
pub use self::util::{has_wildcards, wildcard_match};
