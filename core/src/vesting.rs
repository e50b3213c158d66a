//! Vesting progress for airdrop claims.
//!
//! A beneficiary's schedule carries the total allocation and the amount
//! already claimed; the vested-but-unclaimed (claimable) amount is read
//! separately. The derived partition tolerates transient read skew by
//! clamping, so `vested + not_vested == total` holds exactly and no
//! quantity ever renders negative.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

use crate::{amount::format_tokens, types::Address};

/// On-chain vesting schedule for one beneficiary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct VestingSchedule {
    pub beneficiary: Address,
    /// Total allocation in base units.
    pub total: u128,
    /// Already claimed, in base units.
    pub claimed: u128,
    pub is_active: bool,
}

/// Amount partition derived from a schedule plus the separately-read
/// claimable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VestingProgress {
    pub total: u128,
    /// `claimed + claimable`, clamped to the total.
    pub vested: u128,
    pub claimed: u128,
    pub claimable: u128,
    /// `total - vested`; the clamp above floors read skew at zero.
    pub not_vested: u128,
}

impl VestingProgress {
    pub fn derive(schedule: &VestingSchedule, claimable: u128) -> Self {
        let vested = schedule
            .claimed
            .saturating_add(claimable)
            .min(schedule.total);
        Self {
            total: schedule.total,
            vested,
            claimed: schedule.claimed,
            claimable,
            not_vested: schedule.total - vested,
        }
    }

    /// Two-segment split in basis points, `(vested, not_vested)`.
    ///
    /// The second segment is the complement of the first, so the bar
    /// always sums to exactly 100%. `None` when the total is zero and
    /// there is nothing to render.
    pub fn percentages(&self) -> Option<(u16, u16)> {
        if self.total == 0 {
            return None;
        }
        let vested_bps = (self.vested.saturating_mul(10_000) / self.total) as u16;
        Some((vested_bps, 10_000 - vested_bps))
    }
}

/// Formatted vesting amounts for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VestingView {
    pub total: String,
    pub vested: String,
    pub claimed: String,
    pub claimable: String,
    pub not_vested: String,
    /// `(vested_bps, not_vested_bps)` for the two-segment progress bar;
    /// `None` when no bar should be rendered.
    pub segments: Option<(u16, u16)>,
}

/// Project a schedule into its display view.
pub fn project_vesting(schedule: &VestingSchedule, claimable: u128, precision: u8) -> VestingView {
    let progress = VestingProgress::derive(schedule, claimable);
    VestingView {
        total: format_tokens(progress.total, precision),
        vested: format_tokens(progress.vested, precision),
        claimed: format_tokens(progress.claimed, precision),
        claimable: format_tokens(progress.claimable, precision),
        not_vested: format_tokens(progress.not_vested, precision),
        segments: progress.percentages(),
    }
}
