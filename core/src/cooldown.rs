//! Cooldown ledger projection.
//!
//! Raw cooldown entries come from the staking contract, one per unstake
//! request (amount + unlock timestamp). The projection classifies each
//! entry against a reference clock and aggregates the withdrawable
//! subset. It is a pure function of `(entries, now)`: the wall clock
//! advancing past an unlock time changes the result on the next tick
//! without a new chain read; a fresh read happens only on explicit user
//! action or after a state-changing transaction confirms.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    chrono::DateTime,
    serde::{Deserialize, Serialize},
};

use crate::{amount::format_tokens, config::PortalConfig};

/// A single pending-unstake entry as read from the staking contract.
///
/// Immutable once observed; it disappears from the next chain read when
/// the account withdraws. `unlock_at` is always positive for live
/// entries; the read boundary drops anything else.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct CooldownEntry {
    /// Amount in base units.
    pub amount: u128,

    /// Unix timestamp (seconds) when the amount becomes withdrawable.
    pub unlock_at: i64,
}

/// A cooldown entry annotated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CooldownView {
    /// Amount in base units.
    pub amount: u128,
    /// Formatted amount at the configured display precision.
    pub amount_display: String,
    /// When the unstake was requested (`unlock_at - cooldown_seconds`).
    pub started_at: i64,
    /// Unix timestamp when the amount becomes withdrawable.
    pub unlock_at: i64,
    /// Still inside the cooldown window at the reference clock.
    pub cooling: bool,
    /// UTC unlock date, e.g. `2026-08-13 09:15 UTC`.
    pub unlock_date: String,
}

/// Derived view over the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    /// Entries sorted by unlock time descending (most recently
    /// unlocking or unlocked first).
    pub entries: Vec<CooldownView>,
    /// Sum of all entries whose cooldown has elapsed, in base units.
    pub withdrawable_total: u128,
    /// Formatted withdrawable total.
    pub withdrawable_display: String,
}

/// Sum of all entries withdrawable at `now`, in base units.
///
/// Pure in `(entries, now)`; recomputing it any number of times for the
/// same inputs yields the same total.
pub fn withdrawable_total(entries: &[CooldownEntry], now: i64) -> u128 {
    entries
        .iter()
        .filter(|entry| entry.unlock_at > 0 && now >= entry.unlock_at)
        .fold(0u128, |total, entry| total.saturating_add(entry.amount))
}

/// Project the full ledger view at the reference clock `now`.
pub fn project_ledger(entries: &[CooldownEntry], now: i64, config: &PortalConfig) -> LedgerView {
    let mut live: Vec<CooldownEntry> = entries
        .iter()
        .copied()
        .filter(|entry| entry.unlock_at > 0)
        .collect();
    live.sort_by(|a, b| b.unlock_at.cmp(&a.unlock_at));

    let views = live
        .iter()
        .map(|entry| CooldownView {
            amount: entry.amount,
            amount_display: format_tokens(entry.amount, config.display_precision),
            started_at: entry.unlock_at.saturating_sub(config.cooldown_seconds as i64),
            unlock_at: entry.unlock_at,
            cooling: now < entry.unlock_at,
            unlock_date: format_utc_date(entry.unlock_at),
        })
        .collect();

    let total = withdrawable_total(entries, now);
    LedgerView {
        entries: views,
        withdrawable_total: total,
        withdrawable_display: format_tokens(total, config.display_precision),
    }
}

/// Format an epoch-seconds timestamp as a UTC date string.
pub fn format_utc_date(epoch_seconds: i64) -> String {
    match DateTime::from_timestamp(epoch_seconds, 0) {
        Some(moment) => moment.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

    fn entry(amount_tokens: u128, unlock_at: i64) -> CooldownEntry {
        CooldownEntry {
            amount: amount_tokens * ONE_TOKEN,
            unlock_at,
        }
    }

    #[test]
    fn test_withdrawable_total_splits_on_now() {
        let entries = [entry(5, 1_000), entry(7, 2_000), entry(11, 3_000)];
        assert_eq!(withdrawable_total(&entries, 500), 0);
        assert_eq!(withdrawable_total(&entries, 2_000), 12 * ONE_TOKEN);
        assert_eq!(withdrawable_total(&entries, 9_999), 23 * ONE_TOKEN);
    }

    #[test]
    fn test_withdrawable_exactly_at_unlock() {
        let entries = [entry(5, 1_000)];
        assert_eq!(withdrawable_total(&entries, 999), 0);
        assert_eq!(withdrawable_total(&entries, 1_000), 5 * ONE_TOKEN);
    }

    #[test]
    fn test_invalid_unlock_dropped() {
        let entries = [entry(5, 0), entry(7, -10), entry(11, 1_000)];
        assert_eq!(withdrawable_total(&entries, 2_000), 11 * ONE_TOKEN);
        let view = project_ledger(&entries, 2_000, &PortalConfig::default());
        assert_eq!(view.entries.len(), 1);
    }

    #[test]
    fn test_projection_sorted_descending() {
        let entries = [entry(1, 1_000), entry(2, 3_000), entry(3, 2_000)];
        let view = project_ledger(&entries, 0, &PortalConfig::default());
        let unlocks: Vec<i64> = view.entries.iter().map(|e| e.unlock_at).collect();
        assert_eq!(unlocks, vec![3_000, 2_000, 1_000]);
    }

    #[test]
    fn test_projection_start_time() {
        let config = PortalConfig {
            cooldown_seconds: 600,
            ..Default::default()
        };
        let view = project_ledger(&[entry(1, 10_000)], 9_000, &config);
        assert_eq!(view.entries[0].started_at, 9_400);
        assert!(view.entries[0].cooling);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let entries = [entry(4, 1_000), entry(6, 2_000)];
        let config = PortalConfig::default();
        let first = project_ledger(&entries, 5_000, &config);
        for _ in 0..10 {
            assert_eq!(project_ledger(&entries, 5_000, &config), first);
        }
        assert_eq!(first.withdrawable_total, 10 * ONE_TOKEN);
    }

    #[test]
    fn test_format_utc_date() {
        assert_eq!(format_utc_date(0), "1970-01-01 00:00 UTC");
        assert_eq!(format_utc_date(1_700_000_000), "2023-11-14 22:13 UTC");
    }

    #[test]
    fn test_empty_ledger() {
        let view = project_ledger(&[], 1_000, &PortalConfig::default());
        assert!(view.entries.is_empty());
        assert_eq!(view.withdrawable_total, 0);
        assert_eq!(view.withdrawable_display, "0.00");
    }
}
