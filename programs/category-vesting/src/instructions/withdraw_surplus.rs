use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::VestingError;
use crate::state::EngineState;
use crate::utils::vault::transfer_from_vault;

/// Manager withdraws vault tokens that back no outstanding allocation.
pub fn withdraw_surplus(ctx: Context<WithdrawSurplus>, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::InvalidConfig);

    let st = &ctx.accounts.engine_state;
    st.ensure_manager(&ctx.accounts.manager.key())?;

    require_keys_eq!(
        ctx.accounts.manager_destination.mint,
        st.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.manager_destination.owner,
        ctx.accounts.manager.key(),
        VestingError::InvalidTokenAccount
    );

    let surplus = st.surplus(ctx.accounts.vault.amount)?;
    require!(amount <= surplus, VestingError::InsufficientSurplus);

    transfer_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.manager_destination.to_account_info(),
        ctx.accounts.engine_state.to_account_info(),
        st.bump,
        amount,
    )?;

    emit!(SurplusWithdrawn {
        manager: st.manager,
        amount,
        outstanding: st.outstanding()?,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawSurplus<'info> {
    #[account(seeds = [b"engine_state"], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [b"vault", engine_state.key().as_ref()],
        bump = engine_state.vault_bump,
        constraint = vault.mint == engine_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub manager_destination: Account<'info, TokenAccount>,

    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct SurplusWithdrawn {
    pub manager: Pubkey,
    pub amount: u64,
    pub outstanding: u64,
}
