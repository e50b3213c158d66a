//! # Tokenport Portal Core
//!
//! Client-side calculation core for the Tokenport token portal: staking
//! cooldown accounting, vesting progress, APR composition, and the
//! display-boundary token-amount formatting shared by every surface that
//! renders wallet state.
//!
//! The crate is deliberately free of I/O. Chain and REST reads happen
//! behind the [`chain`] traits and the separate stats-client crate, and
//! every derived view is a pure function of already-fetched values plus a
//! reference clock. The wall clock advancing past an unlock time flips an
//! entry from cooling to claimable locally, with no new chain read.
//!
//! ## Quick start
//!
//! ```rust
//! use tokenport_core::{CooldownEntry, PortalConfig, project_ledger};
//!
//! let config = PortalConfig::default();
//! let entries = vec![
//!     CooldownEntry { amount: 25_000_000_000_000_000_000, unlock_at: 1_700_000_000 },
//!     CooldownEntry { amount: 10_000_000_000_000_000_000, unlock_at: 1_700_600_000 },
//! ];
//!
//! // One entry already unlocked, one still cooling.
//! let view = project_ledger(&entries, 1_700_300_000, &config);
//! assert_eq!(view.withdrawable_total, 25_000_000_000_000_000_000);
//! assert!(view.entries[0].cooling, "latest-unlocking entry sorts first");
//! assert_eq!(view.withdrawable_display, "25.00");
//! ```
//!
//! See [`amount`] for the truncation rules and [`apr`] for the
//! composition formula.

pub mod amount;
pub mod apr;
pub mod chain;
pub mod config;
pub mod cooldown;
pub mod countdown;
pub mod error;
pub mod history;
pub mod loadable;
pub mod schedule;
pub mod types;
pub mod vesting;

#[cfg(test)]
mod tests;

// Re-exports for convenience.
pub use amount::{format_tokens, to_base_units, TOKEN_DECIMALS, UNITS_PER_TOKEN};
pub use apr::{compose_apr, display_apr, AprBreakdown, AprInputs, BPS_PER_UNIT};
pub use config::{validate_config, PortalConfig, RetryPolicy};
pub use cooldown::{project_ledger, withdrawable_total, CooldownEntry, CooldownView, LedgerView};
pub use countdown::{format_countdown, Countdown};
pub use error::PortalError;
pub use history::{merge_history, HistoryEntry, HistoryState, TxKind, TxStatus};
pub use loadable::Loadable;
pub use schedule::IntervalTimer;
pub use types::Address;
pub use vesting::{project_vesting, VestingProgress, VestingSchedule, VestingView};
