//! Account snapshot files.
//!
//! A snapshot is a JSON capture of the chain state the portal would
//! otherwise read over RPC: hex-encoded account blobs plus the
//! separately-read claimable amount. The snapshot implements the core
//! read traits, decoding per paginated call, so a corrupt blob exercises
//! the same fail-safe path a flaky RPC endpoint would.

use {
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

use tokenport_core::{
    chain::{
        decode_vesting_account, encode_vesting_account, CooldownLedgerAccount, CooldownSource,
        VestingSource,
    },
    cooldown::CooldownEntry,
    error::PortalError,
    types::Address,
    vesting::VestingSchedule,
    AprInputs,
};

use crate::CliError;

/// One captured wallet's chain state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Wallet whose state was captured.
    pub owner: Address,

    /// Hex-encoded cooldown-ledger account blob.
    #[serde(default)]
    pub cooldown_account: Option<String>,

    /// Hex-encoded vesting-schedule account blob.
    #[serde(default)]
    pub vesting_account: Option<String>,

    /// Separately-read claimable amount, base-unit decimal string.
    #[serde(default)]
    pub claimable: Option<String>,

    /// Offline APR terms, used when no stats URL is given.
    #[serde(default)]
    pub apr: Option<SnapshotApr>,
}

/// APR terms captured alongside the chain state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotApr {
    pub base_bps: u64,
    #[serde(default)]
    pub bonus_bps: u64,
    pub whale_credit_bps: u64,
    #[serde(default)]
    pub hold_credit_bps: Option<u64>,
    #[serde(default)]
    pub dao_credit_bps: Option<u64>,
}

impl SnapshotApr {
    pub fn to_inputs(&self) -> AprInputs {
        AprInputs {
            base_bps: self.base_bps,
            bonus_bps: self.bonus_bps,
            whale_credit_bps: self.whale_credit_bps,
            hold_credit_bps: self.hold_credit_bps,
            dao_credit_bps: self.dao_credit_bps,
        }
    }
}

impl Snapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Build an example snapshot around the given reference clock: one
    /// cooldown mid-window, one already claimable, and a part-vested
    /// airdrop allocation.
    pub fn example(now: i64) -> Result<Self, PortalError> {
        const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;
        let owner = Address([0x42; 20]);

        let ledger = CooldownLedgerAccount {
            owner,
            entries: vec![
                CooldownEntry {
                    amount: 150 * ONE_TOKEN,
                    unlock_at: now + 3 * 86_400,
                },
                CooldownEntry {
                    amount: 40 * ONE_TOKEN,
                    unlock_at: now - 3_600,
                },
            ],
        };
        let schedule = VestingSchedule {
            beneficiary: owner,
            total: 10_000 * ONE_TOKEN,
            claimed: 2_500 * ONE_TOKEN,
            is_active: true,
        };

        Ok(Self {
            owner,
            cooldown_account: Some(hex::encode(ledger.to_bytes()?)),
            vesting_account: Some(hex::encode(encode_vesting_account(&schedule)?)),
            claimable: Some((1_500 * ONE_TOKEN).to_string()),
            apr: Some(SnapshotApr {
                base_bps: 1_000,
                bonus_bps: 200,
                whale_credit_bps: 10_500,
                hold_credit_bps: Some(11_000),
                dao_credit_bps: None,
            }),
        })
    }

    fn decode_ledger(&self, owner: &Address) -> Result<CooldownLedgerAccount, PortalError> {
        let blob = self.cooldown_account.as_deref().ok_or_else(|| {
            PortalError::AccountDecode(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "snapshot has no cooldown account",
            ))
        })?;
        let data = hex::decode(blob).map_err(|err| {
            PortalError::AccountDecode(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("cooldown account blob is not valid hex: {err}"),
            ))
        })?;
        let ledger = CooldownLedgerAccount::deserialize(&data)?;
        if ledger.owner != *owner {
            return Err(PortalError::AccountDecode(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("cooldown account belongs to {}, not {owner}", ledger.owner),
            )));
        }
        Ok(ledger)
    }
}

impl CooldownSource for Snapshot {
    fn cooldown_count(&self, owner: &Address) -> Result<u32, PortalError> {
        Ok(self.decode_ledger(owner)?.entries.len() as u32)
    }

    fn cooldown_at(&self, owner: &Address, index: u32) -> Result<CooldownEntry, PortalError> {
        let ledger = self.decode_ledger(owner)?;
        ledger
            .entries
            .get(index as usize)
            .copied()
            .ok_or(PortalError::CooldownIndexOutOfBounds {
                index,
                len: ledger.entries.len() as u32,
            })
    }
}

impl VestingSource for Snapshot {
    fn vesting_schedule(&self, beneficiary: &Address) -> Result<Option<VestingSchedule>, PortalError> {
        let Some(blob) = self.vesting_account.as_deref() else {
            return Ok(None);
        };
        let data = hex::decode(blob).map_err(|err| {
            PortalError::AccountDecode(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("vesting account blob is not valid hex: {err}"),
            ))
        })?;
        let schedule = decode_vesting_account(&data)?;
        if schedule.beneficiary != *beneficiary {
            return Ok(None);
        }
        Ok(Some(schedule))
    }

    fn claimable_amount(&self, _beneficiary: &Address) -> Result<u128, PortalError> {
        match self.claimable.as_deref() {
            Some(text) => text.parse().map_err(|_| PortalError::InvalidAmount {
                input: text.to_string(),
            }),
            None => Ok(0),
        }
    }
}
