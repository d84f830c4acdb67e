use anchor_lang::prelude::*;

/// Custom error codes for the category vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: manager signature required")]
    Unauthorized,

    #[msg("Beneficiary is already registered")]
    AlreadyRegistered,

    #[msg("Beneficiary not found")]
    UnknownBeneficiary,

    #[msg("Category is outside the supported set")]
    InvalidCategory,

    #[msg("Invalid schedule: durations must be non-negative and cliff <= duration")]
    InvalidSchedule,

    #[msg("Vesting schedule has already been activated")]
    AlreadyActivated,

    #[msg("Vesting schedule has not started")]
    NotStarted,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid allocation (must be > 0)")]
    InvalidAllocation,

    #[msg("Beneficiary registry is full")]
    RegistryFull,

    #[msg("Vault balance does not cover registered allocations")]
    VaultUnderfunded,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Withdrawal would touch tokens owed to beneficiaries")]
    InsufficientSurplus,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Invalid associated token account for beneficiary")]
    InvalidBeneficiaryAta,

    #[msg("Math overflow")]
    MathOverflow,
}
