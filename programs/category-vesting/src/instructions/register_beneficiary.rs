use anchor_lang::prelude::*;

use crate::state::{Category, EngineState, Registry};

pub fn register_beneficiary(
    ctx: Context<RegisterBeneficiary>,
    wallet: Pubkey,
    category: u8,
) -> Result<()> {
    let manager = ctx.accounts.manager.key();
    let st = &mut ctx.accounts.engine_state;
    let entry = st.register_beneficiary(&mut ctx.accounts.registry, &manager, wallet, category)?;

    emit!(BeneficiaryRegistered {
        wallet: entry.wallet,
        category: entry.category,
        total_allocation: entry.total_allocation,
        beneficiary_count: st.beneficiary_count,
        allocated_total: st.allocated_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RegisterBeneficiary<'info> {
    #[account(mut, seeds = [b"engine_state"], bump = engine_state.bump)]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [b"registry", engine_state.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, Registry>>,

    pub manager: Signer<'info>,
}

#[event]
pub struct BeneficiaryRegistered {
    pub wallet: Pubkey,
    pub category: Category,
    pub total_allocation: u64,
    pub beneficiary_count: u16,
    pub allocated_total: u64,
}
