//! Chain-read boundary: account-blob decoding and fail-safe readers.
//!
//! The portal only ever reads chain state: cooldown arrays (paginated by
//! index) and vesting tuples. A failed or partial read degrades to the
//! empty/zero safe state instead of surfacing stale or misleading data;
//! a partial cooldown ledger in particular would misstate the
//! withdrawable total, so any failure empties it.
//!
//! Account blobs carry a leading discriminator byte to distinguish them
//! from uninitialized or foreign account data, followed by the Borsh
//! payload.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    log::warn,
};

use crate::{
    cooldown::CooldownEntry,
    error::{PortalError, Result},
    types::Address,
    vesting::VestingSchedule,
};

/// Discriminator byte for cooldown-ledger account blobs.
pub const COOLDOWN_LEDGER_DISCRIMINATOR: u8 = 1;

/// Discriminator byte for vesting-schedule account blobs.
pub const VESTING_SCHEDULE_DISCRIMINATOR: u8 = 2;

/// Raw cooldown-ledger account: the owner plus one entry per unstake
/// request, in contract order.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CooldownLedgerAccount {
    pub owner: Address,
    pub entries: Vec<CooldownEntry>,
}

impl CooldownLedgerAccount {
    /// Decode from raw account data (expects the leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        decode_account(data, COOLDOWN_LEDGER_DISCRIMINATOR)
    }

    /// Encode into raw account data (prepends the discriminator).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_account(self, COOLDOWN_LEDGER_DISCRIMINATOR)
    }
}

/// Decode a vesting-schedule account blob.
pub fn decode_vesting_account(data: &[u8]) -> Result<VestingSchedule> {
    decode_account(data, VESTING_SCHEDULE_DISCRIMINATOR)
}

/// Encode a vesting schedule into an account blob.
pub fn encode_vesting_account(schedule: &VestingSchedule) -> Result<Vec<u8>> {
    encode_account(schedule, VESTING_SCHEDULE_DISCRIMINATOR)
}

fn decode_account<T: BorshDeserialize>(data: &[u8], discriminator: u8) -> Result<T> {
    match data.first() {
        Some(&first) if first == discriminator => {}
        _ => {
            return Err(PortalError::AccountDecode(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid account discriminator",
            )));
        }
    }
    let mut payload = &data[1..];
    T::deserialize_reader(&mut payload).map_err(PortalError::AccountDecode)
}

fn encode_account<T: BorshSerialize>(value: &T, discriminator: u8) -> Result<Vec<u8>> {
    let mut out = vec![discriminator];
    value
        .serialize(&mut out)
        .map_err(PortalError::AccountDecode)?;
    Ok(out)
}

/// Paginated access to an account's cooldown entries, as the staking
/// contract exposes them: an array length, then one read per index.
pub trait CooldownSource {
    fn cooldown_count(&self, owner: &Address) -> Result<u32>;
    fn cooldown_at(&self, owner: &Address, index: u32) -> Result<CooldownEntry>;
}

/// Access to a beneficiary's vesting schedule and the separately-derived
/// claimable amount.
pub trait VestingSource {
    fn vesting_schedule(&self, beneficiary: &Address) -> Result<Option<VestingSchedule>>;
    fn claimable_amount(&self, beneficiary: &Address) -> Result<u128>;
}

/// Read all cooldown entries for `owner`, failing safe to an empty
/// ledger on any count, index, or decode failure.
pub fn read_cooldowns(source: &dyn CooldownSource, owner: &Address) -> Vec<CooldownEntry> {
    let count = match source.cooldown_count(owner) {
        Ok(count) => count,
        Err(err) => {
            warn!("cooldown count read failed for {owner}: {err}");
            return Vec::new();
        }
    };

    let mut entries = Vec::with_capacity(count as usize);
    for index in 0..count {
        match source.cooldown_at(owner, index) {
            Ok(entry) if entry.unlock_at > 0 => entries.push(entry),
            Ok(entry) => {
                warn!(
                    "dropping cooldown entry {index} for {owner}: unlock time {} is not positive",
                    entry.unlock_at
                );
            }
            Err(err) => {
                warn!("cooldown read failed for {owner} at index {index}: {err}");
                return Vec::new();
            }
        }
    }
    entries
}

/// Read the vesting schedule plus claimable amount. A missing or failed
/// schedule read yields `None`; a failed claimable read clamps to zero
/// rather than blocking the schedule display.
pub fn read_vesting(
    source: &dyn VestingSource,
    beneficiary: &Address,
) -> Option<(VestingSchedule, u128)> {
    let schedule = match source.vesting_schedule(beneficiary) {
        Ok(Some(schedule)) => schedule,
        Ok(None) => return None,
        Err(err) => {
            warn!("vesting schedule read failed for {beneficiary}: {err}");
            return None;
        }
    };
    let claimable = match source.claimable_amount(beneficiary) {
        Ok(amount) => amount,
        Err(err) => {
            warn!("claimable read failed for {beneficiary}: {err}");
            0
        }
    };
    Some((schedule, claimable))
}
