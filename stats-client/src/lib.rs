//! REST stats client for the Tokenport portal.
//!
//! Wraps the portal backend's read-only JSON endpoints: network staking
//! statistics and wallet-specific APR terms. Requests retry a bounded
//! number of times with linear backoff on transient failures only,
//! honour a cooperative cancel flag between attempts, and degrade to
//! safe defaults for refreshes the user did not initiate.
//!
//! Write transactions never go through this crate and are never
//! auto-retried anywhere in the portal.

pub mod client;
pub mod error;
pub mod response;

pub use client::{CancelFlag, StatsClient};
pub use error::StatsError;
pub use response::{HistoryPage, StakingStats, TvlPoint, WalletApr};
