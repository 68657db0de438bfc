//! Cooperative periodic timer.
//!
//! There is no background thread: the owner polls the [`Interval`] from its
//! event loop and runs one step whenever it reports being due.

use std::time::{Duration, Instant};

/// A running periodic task with a fixed period.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    last_tick: Instant,
}

impl Interval {
    /// Starts a new interval whose first tick is due one period after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Interval {
            period,
            last_tick: now,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` and re-arms the interval if a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) >= self.period {
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    /// Time left until the next tick, zero if it is already due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.period
            .checked_sub(now.saturating_duration_since(self.last_tick))
            .unwrap_or_else(|| Duration::from_secs(0))
    }
}
