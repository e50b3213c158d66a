//! JSON payloads served by the portal stats backend.
//!
//! Rates arrive as percent floats and token amounts as base-unit decimal
//! strings. Conversions into core types floor toward zero, so a rate or
//! balance shown to the user never overstates what the backend reported.

use serde::{Deserialize, Serialize};

use tokenport_core::{AprInputs, HistoryEntry, BPS_PER_UNIT};

/// Network-wide staking statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingStats {
    /// Base staking APR in percent.
    pub base_apr: f64,
    /// Maximum achievable APR in percent, all credits applied.
    pub max_apr: f64,
    /// Total staked across the network, base-unit decimal string.
    pub total_staked_amount: String,
    /// TVL samples, oldest first.
    #[serde(default)]
    pub tvl_history: Vec<TvlPoint>,
}

impl StakingStats {
    /// Wallet-independent composition inputs (base rate only).
    pub fn to_generic_inputs(&self) -> AprInputs {
        AprInputs::flat(percent_to_bps(self.base_apr))
    }
}

/// One TVL sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvlPoint {
    /// Unix timestamp (seconds) of the sample.
    pub timestamp: i64,
    /// Total value locked, base-unit decimal string.
    pub amount: String,
}

/// Wallet-specific APR terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletApr {
    /// Base APR in percent.
    pub base_apr: f64,
    /// Pre-registration bonus in percent.
    #[serde(default)]
    pub bonus_apr: f64,
    /// Base + bonus before credits, in percent.
    #[serde(default)]
    pub total_apr: f64,
    /// Final composed APR in percent, as the backend computed it.
    pub final_apr: f64,
    /// Whether the pre-registration bonus applies to this wallet.
    #[serde(default)]
    pub pre_registered: bool,
    /// Whale-tier credit multiplier (e.g. 1.05), when assigned.
    #[serde(default)]
    pub whale_credit: Option<f64>,
    /// Hold-and-earn credit multiplier, when assigned.
    #[serde(default)]
    pub hold_credit: Option<f64>,
    /// DAO-participation credit multiplier, when assigned.
    #[serde(default)]
    pub dao_credit: Option<f64>,
}

impl WalletApr {
    /// Build composition inputs. The bonus term is zeroed unless the
    /// wallet pre-registered; a missing whale credit is neutral.
    pub fn to_apr_inputs(&self) -> AprInputs {
        AprInputs {
            base_bps: percent_to_bps(self.base_apr),
            bonus_bps: if self.pre_registered {
                percent_to_bps(self.bonus_apr)
            } else {
                0
            },
            whale_credit_bps: self
                .whale_credit
                .map(multiplier_to_bps)
                .unwrap_or(BPS_PER_UNIT),
            hold_credit_bps: self.hold_credit.map(multiplier_to_bps),
            dao_credit_bps: self.dao_credit.map(multiplier_to_bps),
        }
    }
}

/// One page of server-confirmed transaction history from the indexer.
///
/// A page is a snapshot of what the indexer has caught up to; it may
/// lag freshly-submitted transactions, which is why the local store
/// merges pages instead of replacing itself with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
    /// Cursor for the next page; `None` on the last page.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Percent float → basis points, flooring toward zero.
fn percent_to_bps(percent: f64) -> u64 {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    (percent * 100.0).floor() as u64
}

/// Multiplier float (1.05 = 1.05×) → bps of 1×, flooring. A malformed
/// sub-unit multiplier is clamped to neutral rather than shrinking the
/// composed rate below its base.
fn multiplier_to_bps(multiplier: f64) -> u64 {
    if !multiplier.is_finite() {
        return BPS_PER_UNIT;
    }
    let bps = (multiplier * BPS_PER_UNIT as f64).floor();
    if bps < BPS_PER_UNIT as f64 {
        BPS_PER_UNIT
    } else {
        bps as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staking_stats_from_json() {
        let payload = r#"{
            "baseApr": 10.0,
            "maxApr": 22.5,
            "totalStakedAmount": "5000000000000000000000000",
            "tvlHistory": [
                {"timestamp": 1700000000, "amount": "4900000000000000000000000"},
                {"timestamp": 1700086400, "amount": "5000000000000000000000000"}
            ]
        }"#;
        let stats: StakingStats = serde_json::from_str(payload).unwrap();
        assert_eq!(stats.base_apr, 10.0);
        assert_eq!(stats.tvl_history.len(), 2);
        assert_eq!(stats.to_generic_inputs().base_bps, 1_000);
    }

    #[test]
    fn test_tvl_history_defaults_empty() {
        let payload = r#"{"baseApr": 8.0, "maxApr": 20.0, "totalStakedAmount": "0"}"#;
        let stats: StakingStats = serde_json::from_str(payload).unwrap();
        assert!(stats.tvl_history.is_empty());
    }

    #[test]
    fn test_wallet_apr_from_json() {
        let payload = r#"{
            "baseApr": 10.0,
            "bonusApr": 2.0,
            "totalApr": 12.0,
            "finalApr": 13.86,
            "preRegistered": true,
            "whaleCredit": 1.05,
            "holdCredit": 1.1
        }"#;
        let wallet: WalletApr = serde_json::from_str(payload).unwrap();
        let inputs = wallet.to_apr_inputs();
        assert_eq!(inputs.base_bps, 1_000);
        assert_eq!(inputs.bonus_bps, 200);
        assert_eq!(inputs.whale_credit_bps, 10_500);
        assert_eq!(inputs.hold_credit_bps, Some(11_000));
        assert_eq!(inputs.dao_credit_bps, None);
    }

    #[test]
    fn test_bonus_zeroed_without_pre_registration() {
        let wallet = WalletApr {
            base_apr: 10.0,
            bonus_apr: 2.0,
            total_apr: 10.0,
            final_apr: 10.0,
            pre_registered: false,
            whale_credit: None,
            hold_credit: None,
            dao_credit: None,
        };
        let inputs = wallet.to_apr_inputs();
        assert_eq!(inputs.bonus_bps, 0);
        assert_eq!(inputs.whale_credit_bps, BPS_PER_UNIT);
    }

    #[test]
    fn test_history_page_from_json() {
        let payload = r#"{
            "entries": [
                {"id": "0xabc", "kind": "unstake", "amount": 5000000000000000000,
                 "status": "completed", "submittedAt": 1700000000}
            ],
            "nextCursor": "p2"
        }"#;
        let page: HistoryPage = serde_json::from_str(payload).unwrap();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].id, "0xabc");
        assert_eq!(page.next_cursor.as_deref(), Some("p2"));

        let empty: HistoryPage = serde_json::from_str("{}").unwrap();
        assert!(empty.entries.is_empty());
        assert!(empty.next_cursor.is_none());
    }

    #[test]
    fn test_percent_conversion_floors() {
        // 10.349% → 1034 bps, never 1035.
        assert_eq!(percent_to_bps(10.349), 1_034);
        assert_eq!(percent_to_bps(0.0), 0);
        assert_eq!(percent_to_bps(-3.0), 0);
        assert_eq!(percent_to_bps(f64::NAN), 0);
    }

    #[test]
    fn test_multiplier_conversion_floors_and_clamps() {
        assert_eq!(multiplier_to_bps(1.05), 10_500);
        // Sub-unit multipliers are malformed; neutral, not shrinking.
        assert_eq!(multiplier_to_bps(0.9), BPS_PER_UNIT);
        assert_eq!(multiplier_to_bps(f64::NAN), BPS_PER_UNIT);
    }
}
