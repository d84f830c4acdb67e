use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

/// CPI transfer out of the vault, signed by the engine_state PDA.
pub fn transfer_from_vault<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    destination: AccountInfo<'info>,
    engine_state: AccountInfo<'info>,
    engine_state_bump: u8,
    amount: u64,
) -> Result<()> {
    let signer_seeds: &[&[&[u8]]] = &[&[b"engine_state", &[engine_state_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from: vault,
                to: destination,
                authority: engine_state,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Canonical associated token account for `owner` / `mint` under SPL Token.
pub fn expected_ata_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let seeds: &[&[u8]] = &[
        owner.as_ref(),
        anchor_spl::token::ID.as_ref(),
        mint.as_ref(),
    ];
    let (ata, _) = Pubkey::find_program_address(seeds, &anchor_spl::associated_token::ID);
    ata
}
