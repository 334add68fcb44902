// crates/libra-core/src/context.rs
//
// Explicit execution context for protocol entry points.
//
// Every state-changing call receives the identity of its caller, the
// current wall-clock time (unix seconds), and the current block height.
// Guards that depend on "who" and "when" are therefore pure functions of
// their inputs.

use serde::{Deserialize, Serialize};

use crate::identity::AccountId;

/// The ambient facts of a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Account that submitted the call.
    pub caller: AccountId,
    /// Block timestamp in unix seconds.
    pub timestamp: u64,
    /// Block height the call is included in.
    pub block: u64,
}

impl ExecutionContext {
    pub fn new(caller: impl Into<AccountId>, timestamp: u64, block: u64) -> Self {
        Self {
            caller: caller.into(),
            timestamp,
            block,
        }
    }

    /// Same block and time, different caller.
    pub fn with_caller(&self, caller: impl Into<AccountId>) -> Self {
        Self {
            caller: caller.into(),
            timestamp: self.timestamp,
            block: self.block,
        }
    }

    /// Advance to a later block, `seconds` later. Saturates at `u64::MAX`.
    pub fn advance(&self, blocks: u64, seconds: u64) -> Self {
        Self {
            caller: self.caller.clone(),
            timestamp: self.timestamp.saturating_add(seconds),
            block: self.block.saturating_add(blocks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_caller_keeps_time() {
        let ctx = ExecutionContext::new("alice", 1_000, 7);
        let other = ctx.with_caller("bob");
        assert_eq!(other.caller, AccountId::new("bob"));
        assert_eq!(other.timestamp, 1_000);
        assert_eq!(other.block, 7);
    }

    #[test]
    fn test_advance() {
        let ctx = ExecutionContext::new("alice", 1_000, 7).advance(2, 30);
        assert_eq!(ctx.timestamp, 1_030);
        assert_eq!(ctx.block, 9);
        assert_eq!(ctx.caller, AccountId::new("alice"));
    }

    #[test]
    fn test_advance_saturates() {
        let ctx = ExecutionContext::new("alice", u64::MAX - 1, u64::MAX).advance(1, 10);
        assert_eq!(ctx.timestamp, u64::MAX);
        assert_eq!(ctx.block, u64::MAX);
    }
}
