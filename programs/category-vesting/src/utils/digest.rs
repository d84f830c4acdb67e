//! Registry commitment published at activation.
//!
//! digest = blake3(count_le_u64 || leaf_0 || ... || leaf_n), where each leaf is
//! the 48-byte `DigestLeaf` below with integers little-endian.

use bytemuck::{Pod, Zeroable};

use crate::state::BeneficiaryEntry;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct DigestLeaf {
    wallet: [u8; 32],
    total_allocation: u64,
    category: u8,
    _padding: [u8; 7],
}

impl From<&BeneficiaryEntry> for DigestLeaf {
    fn from(e: &BeneficiaryEntry) -> Self {
        Self {
            wallet: e.wallet.to_bytes(),
            total_allocation: e.total_allocation.to_le(),
            category: e.category.index() as u8,
            _padding: [0u8; 7],
        }
    }
}

/// Commitment over wallets, categories and allocations, in registry order.
pub fn registry_digest(entries: &[BeneficiaryEntry]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(entries.len() as u64).to_le_bytes());
    for e in entries {
        hasher.update(bytemuck::bytes_of(&DigestLeaf::from(e)));
    }
    *hasher.finalize().as_bytes()
}
