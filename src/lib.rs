//! slircd-stats - operator diagnostics for the Straylight IRC daemon.
//!
//! Implements the `STATS` command family: a category registry keyed by
//! letter, privilege and pacing gates, routing of requests to other servers,
//! and the report renderers that read the server's shared state.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;
pub mod telemetry;
