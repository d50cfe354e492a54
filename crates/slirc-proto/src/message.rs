//! Owned IRC messages.

use std::fmt::{self, Display, Formatter};

use crate::command::Command;
use crate::prefix::Prefix;
use crate::response::Response;

/// An owned IRC message.
///
/// # Example
///
/// ```
/// use slirc_proto::{Message, Prefix};
///
/// let msg = Message::notice("*", "*** Notice -- hello")
///     .with_prefix(Prefix::ServerName("irc.example.net".into()));
/// assert_eq!(msg.to_string(), ":irc.example.net NOTICE * :*** Notice -- hello\r\n");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Message prefix/source.
    pub prefix: Option<Prefix>,
    /// The IRC command and its parameters.
    pub command: Command,
}

impl Message {
    /// Build a NOTICE with no prefix.
    pub fn notice<T: Into<String>>(target: &str, text: T) -> Self {
        Message {
            prefix: None,
            command: Command::NOTICE(target.to_string(), text.into()),
        }
    }

    /// Replace the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Numeric code if this is a numeric reply.
    pub fn response(&self) -> Option<Response> {
        match &self.command {
            Command::Response(resp, _) => Some(*resp),
            _ => None,
        }
    }

    /// Parameters of a numeric reply, empty otherwise.
    pub fn params(&self) -> &[String] {
        match &self.command {
            Command::Response(_, params) | Command::Raw(_, params) => params,
            _ => &[],
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        write!(f, "{}\r\n", self.command)
    }
}
