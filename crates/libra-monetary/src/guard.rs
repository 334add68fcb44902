// crates/libra-monetary/src/guard.rs
//
// One-call-per-block guard.
//
// A caller may complete at most one protected call per block. The guard
// only remembers the most recent block: callers seen in older blocks are
// irrelevant once the chain has moved on. A call is marked only after it
// succeeded, so a rejected call does not consume the caller's slot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use libra_core::context::ExecutionContext;
use libra_core::error::LibraError;
use libra_core::identity::AccountId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneCallPerBlockGuard {
    /// Last block in which a protected call completed.
    last_block: u64,
    /// Callers that completed a protected call in `last_block`.
    callers: BTreeSet<AccountId>,
}

impl OneCallPerBlockGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject if the caller already completed a protected call this block.
    pub fn check(&self, ctx: &ExecutionContext) -> Result<(), LibraError> {
        if ctx.block == self.last_block && self.callers.contains(&ctx.caller) {
            return Err(LibraError::ReentrantCall {
                caller: ctx.caller.clone(),
                block: ctx.block,
            });
        }
        Ok(())
    }

    /// Record a completed protected call.
    pub fn mark(&mut self, ctx: &ExecutionContext) {
        if ctx.block != self.last_block {
            self.last_block = ctx.block;
            self.callers.clear();
        }
        self.callers.insert(ctx.caller.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_call_same_block_rejected() {
        let mut guard = OneCallPerBlockGuard::new();
        let ctx = ExecutionContext::new("alice", 100, 10);
        assert!(guard.check(&ctx).is_ok());
        guard.mark(&ctx);
        assert!(matches!(
            guard.check(&ctx),
            Err(LibraError::ReentrantCall { block: 10, .. })
        ));
    }

    #[test]
    fn test_other_caller_same_block_allowed() {
        let mut guard = OneCallPerBlockGuard::new();
        let alice = ExecutionContext::new("alice", 100, 10);
        guard.mark(&alice);
        assert!(guard.check(&alice.with_caller("bob")).is_ok());
    }

    #[test]
    fn test_next_block_resets() {
        let mut guard = OneCallPerBlockGuard::new();
        let ctx = ExecutionContext::new("alice", 100, 10);
        guard.mark(&ctx);
        let next = ctx.advance(1, 12);
        assert!(guard.check(&next).is_ok());
        guard.mark(&next);
        assert!(guard.check(&next).is_err());
    }
}
