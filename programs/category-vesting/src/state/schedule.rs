use anchor_lang::prelude::*;

use crate::error::VestingError;

/// The single global vesting schedule.
///
/// Starts `Unstarted` and moves to `Active` exactly once; `Active` is terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScheduleStatus {
    #[default]
    Unstarted,
    Active {
        /// Activation timestamp (Unix seconds).
        start_ts: i64,
        /// Seconds after `start_ts` before anything is releasable.
        cliff_duration: i64,
        /// Seconds after `start_ts` at which allocations are fully vested.
        total_duration: i64,
    },
}

impl ScheduleStatus {
    /// Borsh size of the `Active` variant (tag + 3 * i64).
    pub const SIZE: usize = 1 + 8 + 8 + 8;

    pub fn is_started(&self) -> bool {
        matches!(self, ScheduleStatus::Active { .. })
    }

    /// Returns the activated schedule without mutating `self`.
    pub fn activated(
        &self,
        now_ts: i64,
        cliff_duration: i64,
        total_duration: i64,
    ) -> core::result::Result<ScheduleStatus, VestingError> {
        if self.is_started() {
            return Err(VestingError::AlreadyActivated);
        }
        if cliff_duration < 0 || total_duration < 0 || cliff_duration > total_duration {
            return Err(VestingError::InvalidSchedule);
        }
        Ok(ScheduleStatus::Active {
            start_ts: now_ts,
            cliff_duration,
            total_duration,
        })
    }
}
