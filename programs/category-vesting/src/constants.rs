//! Program-wide constants.

/// Max beneficiaries stored in the registry PDA.
pub const MAX_BENEFICIARIES: usize = 64;

/// Number of beneficiary categories (Seed, Team, Advisor).
pub const CATEGORY_COUNT: usize = 3;

/// Denominator for basis-point allocation rules.
pub const BPS_DENOMINATOR: u64 = 10_000;

