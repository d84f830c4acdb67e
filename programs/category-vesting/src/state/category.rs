use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, CATEGORY_COUNT};
use crate::error::VestingError;

/// Beneficiary category, fixed at registration.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Seed,
    Team,
    Advisor,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [Category::Seed, Category::Team, Category::Advisor];

    /// Position of this category in `EngineState::category_rules`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Category {
    type Error = VestingError;

    fn try_from(tag: u8) -> core::result::Result<Self, Self::Error> {
        Category::ALL
            .get(tag as usize)
            .copied()
            .ok_or(VestingError::InvalidCategory)
    }
}

/// How a category's per-beneficiary allocation is derived.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationRule {
    /// Every beneficiary of the category receives `amount`.
    Fixed { amount: u64 },
    /// Every beneficiary receives `bps` / 10_000 of the mint supply captured at init.
    BasisPoints { bps: u16 },
}

impl AllocationRule {
    /// Borsh size of the largest variant (tag + u64).
    pub const SIZE: usize = 1 + 8;

    pub fn validate(&self) -> core::result::Result<(), VestingError> {
        match *self {
            AllocationRule::Fixed { amount: 0 } => Err(VestingError::InvalidConfig),
            AllocationRule::BasisPoints { bps } if bps == 0 || bps as u64 > BPS_DENOMINATOR => {
                Err(VestingError::InvalidConfig)
            }
            _ => Ok(()),
        }
    }

    /// Resolve the rule to a concrete allocation. Basis points round down.
    pub fn resolve(&self, supply_snapshot: u64) -> core::result::Result<u64, VestingError> {
        match *self {
            AllocationRule::Fixed { amount } => Ok(amount),
            AllocationRule::BasisPoints { bps } => {
                let v = (supply_snapshot as u128)
                    .checked_mul(bps as u128)
                    .ok_or(VestingError::MathOverflow)?
                    / BPS_DENOMINATOR as u128;
                u64::try_from(v).map_err(|_| VestingError::MathOverflow)
            }
        }
    }
}
