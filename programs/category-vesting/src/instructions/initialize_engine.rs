use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::MAX_BENEFICIARIES;
use crate::state::{AllocationRule, EngineState, Registry, ScheduleStatus};

pub fn initialize_engine(
    ctx: Context<InitializeEngine>,
    category_rules: [AllocationRule; 3],
) -> Result<()> {
    for rule in category_rules.iter() {
        rule.validate()?;
    }

    let st = &mut ctx.accounts.engine_state;
    st.mint = ctx.accounts.mint.key();
    st.manager = ctx.accounts.manager.key();
    st.category_rules = category_rules;
    st.supply_snapshot = ctx.accounts.mint.supply;
    st.schedule = ScheduleStatus::Unstarted;
    st.allocated_total = 0;
    st.claimed_total = 0;
    st.beneficiary_count = 0;
    st.registry_digest = [0u8; 32];
    st.bump = ctx.bumps.engine_state;
    st.vault_bump = ctx.bumps.vault;

    ctx.accounts.registry.entries = Vec::new();

    emit!(EngineInitialized {
        mint: st.mint,
        manager: st.manager,
        category_rules,
        supply_snapshot: st.supply_snapshot,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeEngine<'info> {
    #[account(
        init,
        payer = manager,
        space = 8 + EngineState::SIZE,
        seeds = [b"engine_state"],
        bump
    )]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        init,
        payer = manager,
        space = Registry::space(MAX_BENEFICIARIES),
        seeds = [b"registry", engine_state.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, Registry>>,

    #[account(
        init,
        payer = manager,
        token::mint = mint,
        token::authority = engine_state,
        seeds = [b"vault", engine_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct EngineInitialized {
    pub mint: Pubkey,
    pub manager: Pubkey,
    pub category_rules: [AllocationRule; 3],
    pub supply_snapshot: u64,
}
