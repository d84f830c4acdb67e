//! Cliff + linear vesting arithmetic.
//! - vesting is linear from `start_ts`; the cliff only gates release
//! - multiply before divide in u128, floor rounding (never in the beneficiary's favour)
//! - at or after `total_duration` the full allocation is vested

use crate::error::VestingError;
use crate::state::ScheduleStatus;

/// Amount of `total_allocation` vested at `now_ts` under `schedule`.
pub fn vested_amount(
    total_allocation: u64,
    schedule: &ScheduleStatus,
    now_ts: i64,
) -> Result<u64, VestingError> {
    let (start_ts, cliff_duration, total_duration) = match *schedule {
        ScheduleStatus::Unstarted => return Ok(0),
        ScheduleStatus::Active {
            start_ts,
            cliff_duration,
            total_duration,
        } => (start_ts, cliff_duration, total_duration),
    };

    // Clock skew before start counts as zero elapsed.
    let elapsed = now_ts.saturating_sub(start_ts).max(0);
    if elapsed < cliff_duration {
        return Ok(0);
    }
    if elapsed >= total_duration {
        return Ok(total_allocation);
    }

    // 0 <= cliff <= elapsed < total, so total_duration > 0 here.
    let v = (total_allocation as u128)
        .checked_mul(elapsed as u128)
        .ok_or(VestingError::MathOverflow)?
        .checked_div(total_duration as u128)
        .ok_or(VestingError::MathOverflow)?;
    u64::try_from(v).map_err(|_| VestingError::MathOverflow)
}

/// Vested minus already claimed.
pub fn claimable_amount(
    total_allocation: u64,
    claimed_amount: u64,
    schedule: &ScheduleStatus,
    now_ts: i64,
) -> Result<u64, VestingError> {
    vested_amount(total_allocation, schedule, now_ts)?
        .checked_sub(claimed_amount)
        .ok_or(VestingError::MathOverflow)
}
