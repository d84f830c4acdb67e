#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::*;

declare_id!("3WqL2JgUPLu27qwisxX9VXXVJaHa7jsUv6Q6cSKkWwvA");

#[program]
pub mod category_vesting {
    use super::*;

    pub fn initialize_engine(
        ctx: Context<InitializeEngine>,
        category_rules: [AllocationRule; 3],
    ) -> Result<()> {
        instructions::initialize_engine::initialize_engine(ctx, category_rules)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens::deposit_tokens(ctx, amount)
    }

    pub fn register_beneficiary(
        ctx: Context<RegisterBeneficiary>,
        wallet: Pubkey,
        category: u8,
    ) -> Result<()> {
        instructions::register_beneficiary::register_beneficiary(ctx, wallet, category)
    }

    pub fn activate_schedule(
        ctx: Context<ActivateSchedule>,
        cliff_duration: i64,
        total_duration: i64,
    ) -> Result<()> {
        instructions::activate_schedule::activate_schedule(ctx, cliff_duration, total_duration)
    }

    pub fn is_vesting_started(ctx: Context<ScheduleStatusView>) -> Result<bool> {
        instructions::vesting_quote::is_vesting_started(ctx)
    }

    pub fn claim_tokens(ctx: Context<ClaimTokens>) -> Result<u64> {
        instructions::claim_tokens::claim_tokens(ctx)
    }

    pub fn claim_on_behalf(ctx: Context<ClaimOnBehalf>, wallet: Pubkey) -> Result<u64> {
        instructions::claim_tokens::claim_on_behalf(ctx, wallet)
    }

    pub fn vesting_quote(ctx: Context<VestingQuoteView>, wallet: Pubkey) -> Result<u64> {
        instructions::vesting_quote::vesting_quote(ctx, wallet)
    }

    pub fn withdraw_surplus(ctx: Context<WithdrawSurplus>, amount: u64) -> Result<()> {
        instructions::withdraw_surplus::withdraw_surplus(ctx, amount)
    }
}
