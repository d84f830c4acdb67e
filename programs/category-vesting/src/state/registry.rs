use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::{Category, ScheduleStatus};
use crate::utils::vesting_math;

/// A single beneficiary stored in the registry PDA.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeneficiaryEntry {
    pub wallet: Pubkey,
    pub category: Category,
    /// Immutable after registration.
    pub total_allocation: u64,
    /// Cumulative settled amount; only ever increases.
    pub claimed_amount: u64,
}

impl BeneficiaryEntry {
    pub const SIZE: usize =
        32 + // wallet
        1 +  // category
        8 +  // total_allocation
        8;   // claimed_amount

    pub fn vested(&self, schedule: &ScheduleStatus, now_ts: i64) -> core::result::Result<u64, VestingError> {
        vesting_math::vested_amount(self.total_allocation, schedule, now_ts)
    }

    pub fn claimable(&self, schedule: &ScheduleStatus, now_ts: i64) -> core::result::Result<u64, VestingError> {
        vesting_math::claimable_amount(self.total_allocation, self.claimed_amount, schedule, now_ts)
    }
}

/// PDA holding every registered beneficiary (<= MAX_BENEFICIARIES entries).
#[account]
pub struct Registry {
    pub entries: Vec<BeneficiaryEntry>,
}

impl Registry {
    /// Space for discriminator + vec header + `max` entries.
    pub const fn space(max: usize) -> usize {
        8 + 4 + max * BeneficiaryEntry::SIZE
    }

    pub fn find(&self, wallet: &Pubkey) -> Option<&BeneficiaryEntry> {
        self.entries.iter().find(|e| e.wallet == *wallet)
    }

    pub fn find_mut(&mut self, wallet: &Pubkey) -> Option<&mut BeneficiaryEntry> {
        self.entries.iter_mut().find(|e| e.wallet == *wallet)
    }

    pub fn contains(&self, wallet: &Pubkey) -> bool {
        self.find(wallet).is_some()
    }
}
