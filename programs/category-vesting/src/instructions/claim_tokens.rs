use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::VestingError;
use crate::state::{EngineState, Registry};
use crate::utils::vault::{expected_ata_address, transfer_from_vault};

/// Beneficiary settles its own vested-but-unclaimed tokens.
pub fn claim_tokens(ctx: Context<ClaimTokens>) -> Result<u64> {
    // Capture AccountInfos before taking mutable borrows.
    let engine_state_ai = ctx.accounts.engine_state.to_account_info();
    let wallet = ctx.accounts.beneficiary.key();
    let now = Clock::get()?.unix_timestamp;

    require_keys_eq!(
        ctx.accounts.beneficiary_token_account.mint,
        ctx.accounts.engine_state.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.beneficiary_token_account.owner,
        wallet,
        VestingError::InvalidTokenAccount
    );

    let st = &mut ctx.accounts.engine_state;
    // Effects before interaction: claimed_amount is final before the CPI.
    let payable = st.settle_claim(&mut ctx.accounts.registry, &wallet, now, ctx.accounts.vault.amount)?;

    transfer_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.beneficiary_token_account.to_account_info(),
        engine_state_ai,
        st.bump,
        payable,
    )?;

    emit_claimed(&ctx.accounts.registry, wallet, wallet, payable)?;
    Ok(payable)
}

/// Anyone may trigger settlement for `wallet`; tokens only ever go to the
/// wallet's canonical associated token account.
pub fn claim_on_behalf(ctx: Context<ClaimOnBehalf>, wallet: Pubkey) -> Result<u64> {
    let engine_state_ai = ctx.accounts.engine_state.to_account_info();
    let now = Clock::get()?.unix_timestamp;

    let mint = ctx.accounts.engine_state.mint;
    require_keys_eq!(
        ctx.accounts.beneficiary_ata.key(),
        expected_ata_address(&wallet, &mint),
        VestingError::InvalidBeneficiaryAta
    );
    require_keys_eq!(ctx.accounts.beneficiary_ata.mint, mint, VestingError::InvalidTokenMint);
    require_keys_eq!(
        ctx.accounts.beneficiary_ata.owner,
        wallet,
        VestingError::InvalidTokenAccount
    );

    let st = &mut ctx.accounts.engine_state;
    let payable = st.settle_claim(&mut ctx.accounts.registry, &wallet, now, ctx.accounts.vault.amount)?;

    transfer_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.beneficiary_ata.to_account_info(),
        engine_state_ai,
        st.bump,
        payable,
    )?;

    emit_claimed(&ctx.accounts.registry, wallet, ctx.accounts.payer.key(), payable)?;
    Ok(payable)
}

fn emit_claimed(registry: &Registry, wallet: Pubkey, caller: Pubkey, amount: u64) -> Result<()> {
    let entry = registry
        .find(&wallet)
        .ok_or(VestingError::UnknownBeneficiary)?;
    emit!(TokensClaimed {
        wallet,
        caller,
        amount,
        claimed_total: entry.claimed_amount,
        allocation: entry.total_allocation,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimTokens<'info> {
    #[account(mut, seeds = [b"engine_state"], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [b"registry", engine_state.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, Registry>>,

    #[account(
        mut,
        seeds = [b"vault", engine_state.key().as_ref()],
        bump = engine_state.vault_bump,
        constraint = vault.mint == engine_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ClaimOnBehalf<'info> {
    #[account(mut, seeds = [b"engine_state"], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [b"registry", engine_state.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, Registry>>,

    #[account(
        mut,
        seeds = [b"vault", engine_state.key().as_ref()],
        bump = engine_state.vault_bump,
        constraint = vault.mint == engine_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub beneficiary_ata: Account<'info, TokenAccount>,

    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub wallet: Pubkey,
    /// Signer that triggered the settlement (the beneficiary itself for `claim_tokens`).
    pub caller: Pubkey,
    pub amount: u64,
    pub claimed_total: u64,
    pub allocation: u64,
}
