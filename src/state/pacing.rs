//! Server-wide STATS pacing.
//!
//! One timestamp is shared by every requester: an admitted request from any
//! paced client pushes everyone else back by `pace_wait` seconds.

use parking_lot::Mutex;

/// Outcome of [`PacingState::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    RateLimited,
}

#[derive(Debug, Default)]
pub struct PacingState {
    last_used: Mutex<i64>,
}

impl PacingState {
    /// Admit a request at `now`, recording it on success.
    ///
    /// A refused request leaves the timestamp untouched.
    pub fn admit(&self, now: i64, pace_wait: u64) -> Admission {
        let mut last_used = self.last_used.lock();
        let pace = i64::try_from(pace_wait).unwrap_or(i64::MAX);
        if last_used.saturating_add(pace) > now {
            return Admission::RateLimited;
        }
        *last_used = now;
        Admission::Admitted
    }

    /// Time of the last admitted request.
    pub fn last_used(&self) -> i64 {
        *self.last_used.lock()
    }
}
