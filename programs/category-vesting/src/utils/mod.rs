pub mod digest;
pub mod vault;
pub mod vesting_math;
