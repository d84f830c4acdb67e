pub mod initialize_engine;
pub mod deposit_tokens;
pub mod register_beneficiary;
pub mod activate_schedule;
pub mod claim_tokens;
pub mod vesting_quote;
pub mod withdraw_surplus;

pub use initialize_engine::*;
pub use deposit_tokens::*;
pub use register_beneficiary::*;
pub use activate_schedule::*;
pub use claim_tokens::*;
pub use vesting_quote::*;
pub use withdraw_surplus::*;
