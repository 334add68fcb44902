// crates/libra-monetary/src/epoch.rs
//
// Epoch gate for time-rate-limited actions.
//
// Epoch `n` opens at `start_time + n * period`. An epoch-gated call may
// proceed once the current epoch's opening point has passed, and on
// success advances the counter by one. Missed epochs are not skipped:
// after a long pause, consecutive calls can each succeed until the counter
// catches up with wall-clock time.

use serde::{Deserialize, Serialize};

use libra_core::context::ExecutionContext;
use libra_core::error::LibraError;

/// Converts wall-clock time into a monotonically increasing epoch counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochGate {
    /// Length of one epoch in seconds.
    period: u64,
    /// Unix time at which epoch 0 opens.
    start_time: u64,
    /// Number of epochs completed so far.
    epoch: u64,
}

impl EpochGate {
    /// # Errors
    /// Returns `LibraError::InvalidConfig` if `period` is zero.
    pub fn new(period: u64, start_time: u64, start_epoch: u64) -> Result<Self, LibraError> {
        if period == 0 {
            return Err(LibraError::InvalidConfig(
                "epoch period must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            period,
            start_time,
            epoch: start_epoch,
        })
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// Time at which the current epoch's gated action becomes allowed.
    pub fn next_epoch_point(&self) -> u64 {
        self.start_time
            .saturating_add(self.epoch.saturating_mul(self.period))
    }

    pub fn has_started(&self, now: u64) -> bool {
        now >= self.start_time
    }

    pub fn is_epoch_elapsed(&self, now: u64) -> bool {
        now >= self.next_epoch_point()
    }

    pub fn check_start_time(&self, ctx: &ExecutionContext) -> Result<(), LibraError> {
        if !self.has_started(ctx.timestamp) {
            return Err(LibraError::NotStarted {
                start_time: self.start_time,
                now: ctx.timestamp,
            });
        }
        Ok(())
    }

    pub fn check_epoch(&self, ctx: &ExecutionContext) -> Result<(), LibraError> {
        if !self.is_epoch_elapsed(ctx.timestamp) {
            return Err(LibraError::EpochNotElapsed {
                next_epoch_point: self.next_epoch_point(),
                now: ctx.timestamp,
            });
        }
        Ok(())
    }

    /// Close the current epoch.
    pub fn advance(&mut self) {
        self.epoch += 1;
    }

    /// # Errors
    /// Returns `LibraError::InvalidConfig` if `period` is zero.
    pub fn set_period(&mut self, period: u64) -> Result<(), LibraError> {
        if period == 0 {
            return Err(LibraError::InvalidConfig(
                "epoch period must be non-zero".to_string(),
            ));
        }
        self.period = period;
        Ok(())
    }
}
