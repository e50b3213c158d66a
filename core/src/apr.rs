//! APR composition.
//!
//! The displayed APR combines a base rate, a conditional pre-registration
//! bonus, and independent multiplicative credits:
//!
//! ```text
//! final = (base + bonus) × whale × (hold ?? 1) × (dao ?? 1)
//! ```
//!
//! Rates are carried in basis points (1000 = 10%) and credits in basis
//! points of 1× (10_500 = 1.05×). A credit that has not been fetched yet
//! is neutral, not zero. Each factor is applied with u128 widening and
//! truncating division, so the composed rate never overstates.

use {serde::Serialize, std::fmt};

use crate::{error::PortalError, loadable::Loadable};

/// Basis points in 1.0× (also 100%).
pub const BPS_PER_UNIT: u64 = 10_000;

/// Input terms for one APR composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AprInputs {
    /// Base staking APR in basis points (1000 = 10%).
    pub base_bps: u64,

    /// Pre-registration bonus in basis points; 0 when the condition does
    /// not hold.
    pub bonus_bps: u64,

    /// Whale-tier credit multiplier in bps of 1× (10_500 = 1.05×).
    pub whale_credit_bps: u64,

    /// Hold-and-earn credit multiplier; `None` until fetched.
    pub hold_credit_bps: Option<u64>,

    /// DAO-participation credit multiplier; `None` until fetched.
    pub dao_credit_bps: Option<u64>,
}

impl AprInputs {
    /// Inputs with every credit neutral.
    pub fn flat(base_bps: u64) -> Self {
        Self {
            base_bps,
            bonus_bps: 0,
            whale_credit_bps: BPS_PER_UNIT,
            hold_credit_bps: None,
            dao_credit_bps: None,
        }
    }
}

/// A composed APR, retaining every contributing term so the UI can show
/// the formula and not just the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AprBreakdown {
    pub base_bps: u64,
    pub bonus_bps: u64,
    pub whale_credit_bps: u64,
    pub hold_credit_bps: Option<u64>,
    pub dao_credit_bps: Option<u64>,
    /// `(base + bonus) × whale × (hold ?? 1) × (dao ?? 1)` in basis points.
    pub final_bps: u64,
}

impl AprBreakdown {
    /// Final rate as a percentage, for display only.
    pub fn final_percent(&self) -> f64 {
        self.final_bps as f64 / 100.0
    }
}

impl fmt::Display for AprBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}% + {:.2}%) × {:.2}",
            self.base_bps as f64 / 100.0,
            self.bonus_bps as f64 / 100.0,
            self.whale_credit_bps as f64 / BPS_PER_UNIT as f64,
        )?;
        for credit in [self.hold_credit_bps, self.dao_credit_bps].into_iter().flatten() {
            write!(f, " × {:.2}", credit as f64 / BPS_PER_UNIT as f64)?;
        }
        write!(f, " = {:.2}%", self.final_percent())
    }
}

/// Compose the final APR from its terms.
///
/// Unavailable credits are treated as multiplier 1 (neutral), never zero.
pub fn compose_apr(inputs: &AprInputs) -> AprBreakdown {
    let mut final_bps = (inputs.base_bps as u128).saturating_add(inputs.bonus_bps as u128);
    let credits = [
        Some(inputs.whale_credit_bps),
        inputs.hold_credit_bps,
        inputs.dao_credit_bps,
    ];
    for credit in credits.into_iter().flatten() {
        final_bps = final_bps.saturating_mul(credit as u128) / BPS_PER_UNIT as u128;
    }
    AprBreakdown {
        base_bps: inputs.base_bps,
        bonus_bps: inputs.bonus_bps,
        whale_credit_bps: inputs.whale_credit_bps,
        hold_credit_bps: inputs.hold_credit_bps,
        dao_credit_bps: inputs.dao_credit_bps,
        final_bps: final_bps.min(u64::MAX as u128) as u64,
    }
}

/// Validate that every known credit is at least the 1× floor.
pub fn validate_inputs(inputs: &AprInputs) -> Result<(), PortalError> {
    let credits = [
        ("whale", Some(inputs.whale_credit_bps)),
        ("hold", inputs.hold_credit_bps),
        ("dao", inputs.dao_credit_bps),
    ];
    for (name, credit) in credits {
        if let Some(credit) = credit {
            if credit < BPS_PER_UNIT {
                return Err(PortalError::InvalidConfig {
                    reason: format!("{name} credit ({credit} bps) is below the 1.00x floor"),
                });
            }
        }
    }
    Ok(())
}

/// Resolve the APR to display for a wallet.
///
/// While the wallet-specific fetch is in flight the result stays
/// `Loading`; the generic composition is used only once the wallet value
/// has settled as unavailable. This keeps a stale generic rate from
/// being shown while a real fetch is pending.
pub fn display_apr(generic: &AprInputs, wallet: &Loadable<AprInputs>) -> Loadable<AprBreakdown> {
    match wallet {
        Loadable::Loading => Loadable::Loading,
        Loadable::Unavailable => Loadable::Ready(compose_apr(generic)),
        Loadable::Ready(inputs) => Loadable::Ready(compose_apr(inputs)),
    }
}
