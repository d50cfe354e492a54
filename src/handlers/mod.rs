//! IRC command handlers.
//!
//! Only the STATS family lives here; the connection loop hands each inbound
//! message to [`StatsHandler`] with a [`Context`] describing the requester.

mod core;
pub mod helpers;
pub mod stats;

pub use self::core::{Context, Handler, ResponseMiddleware};
pub use helpers::{
    err_needmoreparams, err_noprivileges, err_nosuchserver, rpl_load2hi, server_reply,
};
pub use stats::StatsHandler;
