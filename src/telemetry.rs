//! Telemetry utilities for report timing and request spans.

use std::time::Instant;

/// Guard for timing a report render and recording metrics.
///
/// Records render latency when dropped.
pub struct ReportTimer {
    letter: char,
    start: Instant,
}

impl ReportTimer {
    /// Start timing the report for `letter`.
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            start: Instant::now(),
        }
    }
}

impl Drop for ReportTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_render(self.letter, duration);
    }
}

/// Standardized span constructors for IRC observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one STATS request.
    pub fn stats_request(uid: &str, letter: Option<char>, target: Option<&str>) -> Span {
        let letter = letter.unwrap_or('*');
        if let Some(target) = target {
            info_span!("stats", uid = %uid, letter = %letter, target = %target)
        } else {
            info_span!("stats", uid = %uid, letter = %letter)
        }
    }
}
