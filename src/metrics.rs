//! Prometheus metrics for the STATS subsystem.
//!
//! - `irc_stats_requests_total{letter}` - Requests answered locally
//! - `irc_stats_denied_total` - Requests refused for lack of privilege
//! - `irc_stats_rate_limited_total` - Requests refused by pacing
//! - `irc_stats_forwarded_total` - Requests routed to another server
//! - `irc_stats_render_seconds{letter}` - Report rendering latency
//! - `irc_command_errors_total{command,error}` - Handler failures

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// STATS requests answered by this server, by letter.
pub static STATS_REQUESTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Requests refused with ERR_NOPRIVILEGES by the category gate.
pub static STATS_DENIED: OnceLock<IntCounter> = OnceLock::new();

/// Requests refused with RPL_LOAD2HI.
pub static STATS_RATE_LIMITED: OnceLock<IntCounter> = OnceLock::new();

/// Requests handed to a linked server.
pub static STATS_FORWARDED: OnceLock<IntCounter> = OnceLock::new();

/// Command errors by type and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Time spent rendering one report.
pub static RENDER_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Register all metrics with the global registry.
///
/// Repeat calls keep the first set of metrics and log the duplicate
/// registration.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::debug!(error = %e, concat!("Metric already registered: ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(STATS_REQUESTS, IntCounterVec::new(Opts::new("irc_stats_requests_total", "STATS requests answered locally"), &["letter"]));
    register!(STATS_DENIED, IntCounter::new("irc_stats_denied_total", "STATS requests refused for privilege"));
    register!(STATS_RATE_LIMITED, IntCounter::new("irc_stats_rate_limited_total", "STATS requests refused by pacing"));
    register!(STATS_FORWARDED, IntCounter::new("irc_stats_forwarded_total", "STATS requests routed to another server"));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("irc_command_errors_total", "IRC command errors by type"), &["command", "error"]));
    register!(RENDER_LATENCY, HistogramVec::new(
        HistogramOpts::new("irc_stats_render_seconds", "STATS report rendering latency")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
        &["letter"]));
}

// ========================================================================
// Recording helpers
// ========================================================================

pub fn record_stats_request(letter: char) {
    if let Some(m) = STATS_REQUESTS.get() {
        let mut buf = [0u8; 4];
        m.with_label_values(&[&*letter.encode_utf8(&mut buf)]).inc();
    }
}

pub fn record_stats_denied() {
    if let Some(m) = STATS_DENIED.get() {
        m.inc();
    }
}

pub fn record_stats_rate_limited() {
    if let Some(m) = STATS_RATE_LIMITED.get() {
        m.inc();
    }
}

pub fn record_stats_forwarded() {
    if let Some(m) = STATS_FORWARDED.get() {
        m.inc();
    }
}

pub fn record_command_error(command: &str, error: &str) {
    if let Some(m) = COMMAND_ERRORS.get() {
        m.with_label_values(&[command, error]).inc();
    }
}

pub fn record_render(letter: char, duration_secs: f64) {
    if let Some(m) = RENDER_LATENCY.get() {
        let mut buf = [0u8; 4];
        m.with_label_values(&[&*letter.encode_utf8(&mut buf)])
            .observe(duration_secs);
    }
}

/// Gather all metrics in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_counters_show_up() {
        init();
        init();
        record_stats_request('u');
        record_stats_denied();
        let text = gather_metrics();
        assert!(text.contains("irc_stats_requests_total"));
        assert!(text.contains("irc_stats_denied_total"));
    }
}
