//! IRC numeric response codes used by the STATS subsystem.
//!
//! Codes follow the ircd-hybrid numbering for the STATS family, which is the
//! de-facto standard for `RPL_STATS*` lines that RFC 2812 leaves open.
//!
//! # Reference
//! - RFC 2812 §5: Replies
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;

use crate::error::ResponseParseError;

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Stats replies (200-299) ===
    /// 211 - Connection traffic line
    RPL_STATSLINKINFO = 211,
    /// 212 - Command usage line
    RPL_STATSCOMMANDS = 212,
    /// 213 - Connect block
    RPL_STATSCLINE = 213,
    /// 215 - Auth block
    RPL_STATSILINE = 215,
    /// 216 - K-line
    RPL_STATSKLINE = 216,
    /// 217 - Resv entry
    RPL_STATSQLINE = 217,
    /// 218 - Connection class
    RPL_STATSYLINE = 218,
    /// 219 - End of stats
    RPL_ENDOFSTATS = 219,
    /// 220 - Listener
    RPL_STATSPLINE = 220,
    /// 225 - D-line or exempt block
    RPL_STATSDLINE = 225,
    /// 226 - DNS server
    RPL_STATSALINE = 226,
    /// 241 - Leaf mask
    RPL_STATSLLINE = 241,
    /// 242 - Server uptime
    RPL_STATSUPTIME = 242,
    /// 243 - Operator block
    RPL_STATSOLINE = 243,
    /// 244 - Hub mask
    RPL_STATSHLINE = 244,
    /// 246 - Service block
    RPL_STATSSERVICE = 246,
    /// 247 - Gecos ban
    RPL_STATSXLINE = 247,
    /// 248 - Shared/cluster block
    RPL_STATSULINE = 248,
    /// 249 - Free-form debug line
    RPL_STATSDEBUG = 249,
    /// 250 - Connection high-water marks
    RPL_STATSCONN = 250,
    /// 263 - Server too busy, try again
    RPL_LOAD2HI = 263,

    // === Errors (400-599) ===
    /// 402 - No such server
    ERR_NOSUCHSERVER = 402,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 481 - Permission denied
    ERR_NOPRIVILEGES = 481,
}

const ALL: &[Response] = &[
    Response::RPL_STATSLINKINFO,
    Response::RPL_STATSCOMMANDS,
    Response::RPL_STATSCLINE,
    Response::RPL_STATSILINE,
    Response::RPL_STATSKLINE,
    Response::RPL_STATSQLINE,
    Response::RPL_STATSYLINE,
    Response::RPL_ENDOFSTATS,
    Response::RPL_STATSPLINE,
    Response::RPL_STATSDLINE,
    Response::RPL_STATSALINE,
    Response::RPL_STATSLLINE,
    Response::RPL_STATSUPTIME,
    Response::RPL_STATSOLINE,
    Response::RPL_STATSHLINE,
    Response::RPL_STATSSERVICE,
    Response::RPL_STATSXLINE,
    Response::RPL_STATSULINE,
    Response::RPL_STATSDEBUG,
    Response::RPL_STATSCONN,
    Response::RPL_LOAD2HI,
    Response::ERR_NOSUCHSERVER,
    Response::ERR_NEEDMOREPARAMS,
    Response::ERR_NOPRIVILEGES,
];

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Creates a Response from a numeric code
    pub fn from_code(code: u16) -> Option<Response> {
        ALL.iter().copied().find(|r| r.code() == code)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

impl FromStr for Response {
    type Err = ResponseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: u16 = s
            .parse()
            .map_err(|_| ResponseParseError::NotNumeric(s.to_string()))?;
        Response::from_code(code).ok_or(ResponseParseError::Unknown(code))
    }
}
