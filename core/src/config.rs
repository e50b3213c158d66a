use {
    serde::{Deserialize, Serialize},
    std::time::Duration,
};

use crate::{amount::MAX_DISPLAY_PRECISION, error::PortalError};

/// Retry policy for read-only backend fetches.
///
/// Applies to history/stats reads only. Write transactions are never
/// auto-retried; the user must re-initiate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum attempts per request, first try included.
    pub max_attempts: u32,

    /// Linear backoff step: failed attempt `n` waits `n × backoff_step_ms`
    /// before the next try.
    pub backoff_step_ms: u64,
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_step_ms.saturating_mul(attempt as u64))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step_ms: 500,
        }
    }
}

/// Portal-wide tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Mandatory waiting period between an unstake request and the funds
    /// becoming withdrawable (seconds).
    pub cooldown_seconds: u64,

    /// Fractional digits shown for token amounts (0–3).
    pub display_precision: u8,

    /// Countdown re-render interval while a claim view is active.
    pub countdown_tick_ms: u64,

    /// Poll interval for reconciling optimistic pending transactions
    /// against the indexer.
    pub history_poll_ms: u64,

    /// Retry policy for read-only stats fetches.
    pub retry: RetryPolicy,
}

impl PortalConfig {
    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }

    pub fn history_poll(&self) -> Duration {
        Duration::from_millis(self.history_poll_ms)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 7 * 24 * 60 * 60, // 7-day unstake cooldown
            display_precision: 2,
            countdown_tick_ms: 1_000,
            history_poll_ms: 5_000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Validate that a `PortalConfig` is internally consistent.
pub fn validate_config(config: &PortalConfig) -> Result<(), PortalError> {
    if config.cooldown_seconds == 0 {
        return Err(PortalError::InvalidConfig {
            reason: "cooldown_seconds must be > 0".to_string(),
        });
    }
    if config.display_precision > MAX_DISPLAY_PRECISION {
        return Err(PortalError::InvalidConfig {
            reason: format!(
                "display_precision ({}) exceeds maximum ({MAX_DISPLAY_PRECISION})",
                config.display_precision
            ),
        });
    }
    if config.countdown_tick_ms == 0 {
        return Err(PortalError::InvalidConfig {
            reason: "countdown_tick_ms must be > 0".to_string(),
        });
    }
    if config.history_poll_ms == 0 {
        return Err(PortalError::InvalidConfig {
            reason: "history_poll_ms must be > 0".to_string(),
        });
    }
    if config.retry.max_attempts == 0 {
        return Err(PortalError::InvalidConfig {
            reason: "retry.max_attempts must be > 0".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortalConfig::default();
        assert_eq!(config.cooldown_seconds, 604_800);
        assert_eq!(config.display_precision, 2);
        assert_eq!(config.countdown_tick_ms, 1_000);
        assert_eq!(config.history_poll_ms, 5_000);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_step_ms, 500);
    }

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&PortalConfig::default()).is_ok());
    }

    #[test]
    fn test_backoff_is_linear() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(retry.backoff_delay(2), Duration::from_millis(1_000));
        assert_eq!(retry.backoff_delay(3), Duration::from_millis(1_500));
    }

    #[test]
    fn test_validate_zero_cooldown() {
        let config = PortalConfig {
            cooldown_seconds: 0,
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(PortalError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_precision_too_high() {
        let config = PortalConfig {
            display_precision: 4,
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(PortalError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_zero_intervals() {
        for (tick, poll) in [(0, 5_000), (1_000, 0)] {
            let config = PortalConfig {
                countdown_tick_ms: tick,
                history_poll_ms: poll,
                ..Default::default()
            };
            assert!(validate_config(&config).is_err());
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let config = PortalConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let decoded: PortalConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }
}
