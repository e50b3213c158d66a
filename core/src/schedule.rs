//! Interval timers for the portal's two local loops: the 1-second
//! countdown tick and the 5-second pending-transaction poll.
//!
//! A timer is inert until started and after cancellation. Tearing a view
//! down cancels its timers, so no background ticking outlives the view
//! that owns it.

use std::time::{Duration, Instant};

/// A polled repeating timer.
#[derive(Debug)]
pub struct IntervalTimer {
    period: Duration,
    /// Start of the current period (if armed).
    started_at: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            started_at: None,
        }
    }

    /// Arm the timer; the first firing is one full period from now.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Disarm the timer.
    pub fn cancel(&mut self) {
        self.started_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns true when a full period has elapsed, re-arming for the
    /// next one. Always false while disarmed.
    pub fn poll(&mut self) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        if started_at.elapsed() >= self.period {
            self.started_at = Some(Instant::now());
            true
        } else {
            false
        }
    }

    /// Time until the next firing; `None` while disarmed.
    pub fn remaining(&self) -> Option<Duration> {
        let started_at = self.started_at?;
        Some(self.period.saturating_sub(started_at.elapsed()))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
