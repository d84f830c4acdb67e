use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::{EngineState, Registry};

pub fn is_vesting_started(ctx: Context<ScheduleStatusView>) -> Result<bool> {
    Ok(ctx.accounts.engine_state.schedule.is_started())
}

/// Read-only quote of what `wallet` could claim right now.
pub fn vesting_quote(ctx: Context<VestingQuoteView>, wallet: Pubkey) -> Result<u64> {
    let st = &ctx.accounts.engine_state;
    let now = Clock::get()?.unix_timestamp;

    let entry = ctx
        .accounts
        .registry
        .find(&wallet)
        .ok_or(VestingError::UnknownBeneficiary)?;

    let vested = entry.vested(&st.schedule, now)?;
    let claimable = entry.claimable(&st.schedule, now)?;

    emit!(VestingQuoted {
        wallet,
        started: st.schedule.is_started(),
        allocation: entry.total_allocation,
        vested_amount: vested,
        claimed_amount: entry.claimed_amount,
        claimable,
    });

    Ok(claimable)
}

#[derive(Accounts)]
pub struct ScheduleStatusView<'info> {
    #[account(seeds = [b"engine_state"], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,
}

#[derive(Accounts)]
pub struct VestingQuoteView<'info> {
    #[account(seeds = [b"engine_state"], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        seeds = [b"registry", engine_state.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, Registry>>,
}

#[event]
pub struct VestingQuoted {
    pub wallet: Pubkey,
    pub started: bool,
    pub allocation: u64,
    pub vested_amount: u64,
    pub claimed_amount: u64,
    pub claimable: u64,
}
