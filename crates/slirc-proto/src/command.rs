//! IRC commands emitted by the STATS subsystem.

use std::fmt::{self, Write};

use crate::response::Response;

/// An IRC command with its parameters.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// `NOTICE <target> :<text>`
    NOTICE(String, String),
    /// `STATS <letter> [:<target>]`, as relayed between servers.
    STATS(String, Option<String>),
    /// A numeric reply with its parameters, first parameter being the client.
    Response(Response, Vec<String>),
    /// Any other command, passed through verbatim.
    Raw(String, Vec<String>),
}

/// Trailing parameters need a colon if they are empty, contain a space or
/// start with a colon.
fn needs_colon_prefix(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

fn write_args<'a>(
    f: &mut fmt::Formatter<'_>,
    args: impl ExactSizeIterator<Item = &'a str>,
) -> fmt::Result {
    let last = args.len().saturating_sub(1);
    for (i, arg) in args.enumerate() {
        f.write_char(' ')?;
        if i == last && needs_colon_prefix(arg) {
            f.write_char(':')?;
        }
        f.write_str(arg)?;
    }
    Ok(())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NOTICE(target, text) => {
                write!(f, "NOTICE {} :{}", target, text)
            }
            Command::STATS(letter, None) => write!(f, "STATS {}", letter),
            Command::STATS(letter, Some(target)) => write!(f, "STATS {} :{}", letter, target),
            Command::Response(resp, args) => {
                write!(f, "{}", resp)?;
                write_args(f, args.iter().map(String::as_str))
            }
            Command::Raw(cmd, args) => {
                f.write_str(cmd)?;
                write_args(f, args.iter().map(String::as_str))
            }
        }
    }
}
