//! `DD:HH:MM:SS` countdown presentation.
//!
//! Driven by a local 1-second tick while the claim view is active; the
//! flip from cooling to claimable happens the moment the remaining time
//! reaches zero, with no chain event involved.

use std::fmt;

/// Seconds left until `unlock_at`, floored at zero.
pub fn remaining_seconds(unlock_at: i64, now: i64) -> u64 {
    unlock_at.saturating_sub(now).max(0) as u64
}

/// A decomposed countdown to an unlock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        }
    }

    pub fn to_unlock(unlock_at: i64, now: i64) -> Self {
        Self::from_seconds(remaining_seconds(unlock_at, now))
    }

    /// True once the countdown has reached `00:00:00:00`.
    pub fn is_elapsed(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Shorthand: formatted countdown from `now` to `unlock_at`.
pub fn format_countdown(unlock_at: i64, now: i64) -> String {
    Countdown::to_unlock(unlock_at, now).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposition() {
        let countdown = Countdown::from_seconds(3 * 86_400 + 4 * 3_600 + 5 * 60 + 6);
        assert_eq!(countdown.days, 3);
        assert_eq!(countdown.hours, 4);
        assert_eq!(countdown.minutes, 5);
        assert_eq!(countdown.seconds, 6);
        assert_eq!(countdown.to_string(), "03:04:05:06");
    }

    #[test]
    fn test_zero_padding() {
        assert_eq!(format_countdown(61, 0), "00:00:01:01");
        assert_eq!(format_countdown(0, 0), "00:00:00:00");
    }

    #[test]
    fn test_days_widen_past_two_digits() {
        let countdown = Countdown::from_seconds(120 * 86_400);
        assert_eq!(countdown.to_string(), "120:00:00:00");
    }

    #[test]
    fn test_floors_at_zero_after_unlock() {
        assert_eq!(remaining_seconds(1_000, 1_000), 0);
        assert_eq!(remaining_seconds(1_000, 5_000), 0);
        assert_eq!(format_countdown(1_000, 5_000), "00:00:00:00");
    }

    #[test]
    fn test_strictly_decreases_toward_unlock() {
        let unlock_at = 10_000;
        let mut previous = remaining_seconds(unlock_at, 9_000);
        for now in 9_001..=unlock_at {
            let remaining = remaining_seconds(unlock_at, now);
            assert!(remaining < previous, "countdown must strictly decrease");
            previous = remaining;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_is_elapsed() {
        assert!(Countdown::from_seconds(0).is_elapsed());
        assert!(!Countdown::from_seconds(1).is_elapsed());
    }
}
