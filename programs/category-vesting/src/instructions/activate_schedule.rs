use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::error::VestingError;
use crate::state::{EngineState, Registry};

pub fn activate_schedule(
    ctx: Context<ActivateSchedule>,
    cliff_duration: i64,
    total_duration: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let manager = ctx.accounts.manager.key();
    let vault_balance = ctx.accounts.vault.amount;

    let st = &mut ctx.accounts.engine_state;
    st.activate_schedule(
        &ctx.accounts.registry,
        &manager,
        now,
        cliff_duration,
        total_duration,
        vault_balance,
    )?;

    msg!(
        "vesting started: start_ts={} cliff={} duration={} beneficiaries={}",
        now,
        cliff_duration,
        total_duration,
        st.beneficiary_count
    );

    emit!(ScheduleActivated {
        start_ts: now,
        cliff_duration,
        total_duration,
        beneficiary_count: st.beneficiary_count,
        allocated_total: st.allocated_total,
        registry_digest: st.registry_digest,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ActivateSchedule<'info> {
    #[account(mut, seeds = [b"engine_state"], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        seeds = [b"registry", engine_state.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, Registry>>,

    #[account(
        seeds = [b"vault", engine_state.key().as_ref()],
        bump = engine_state.vault_bump,
        constraint = vault.mint == engine_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub manager: Signer<'info>,
}

#[event]
pub struct ScheduleActivated {
    pub start_ts: i64,
    pub cliff_duration: i64,
    pub total_duration: i64,
    pub beneficiary_count: u16,
    pub allocated_total: u64,
    pub registry_digest: [u8; 32],
}
