use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::VestingError;
use crate::state::EngineState;

pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::InvalidConfig);

    let st = &ctx.accounts.engine_state;
    st.ensure_manager(&ctx.accounts.manager.key())?;
    require!(!st.schedule.is_started(), VestingError::AlreadyActivated);

    require_keys_eq!(ctx.accounts.manager_token_account.mint, st.mint, VestingError::InvalidTokenMint);
    require_keys_eq!(
        ctx.accounts.manager_token_account.owner,
        ctx.accounts.manager.key(),
        VestingError::InvalidTokenAccount
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.manager_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.manager.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;

    emit!(TokensDeposited {
        manager: st.manager,
        amount,
        vault_balance: ctx.accounts.vault.amount,
        allocated_total: st.allocated_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositTokens<'info> {
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
    pub manager_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensDeposited {
    pub manager: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
    pub allocated_total: u64,
}
