// crates/libra-monetary/src/boardroom.rs
//
// Boardroom: share stakers receive the expansion seigniorage the treasury
// does not route to the fund or the bond reserve.
//
// Allocations are lump sums rather than a stream. Each allocation is
// folded into the shared reward-per-token accumulator at once, so every
// share staked at that moment earns its pro-rata cut. An allocation that
// arrives while nothing is staked is held back and folded into the next
// allocation that finds stakers.
//
// The boardroom is shared with the treasury behind `Arc<dyn
// SeigniorageReceiver>`, so entry points take `&self` and state lives
// behind a lock.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use libra_core::authority::{Authority, Role};
use libra_core::context::ExecutionContext;
use libra_core::error::LibraError;
use libra_core::identity::AccountId;
use libra_core::math::checked_add;
use libra_core::traits::{Operated, SeigniorageReceiver};

use crate::accrual::{RewardAccrual, StakeAssets};
use crate::events::PoolEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardroomState {
    pub authority: Authority,
    pub accrual: RewardAccrual,
    /// Seigniorage received while nothing was staked.
    pub undistributed: u128,
    pub events: Vec<PoolEvent>,
}

/// Share-staking seigniorage receiver.
#[derive(Debug)]
pub struct Boardroom {
    assets: StakeAssets,
    state: RwLock<BoardroomState>,
}

impl Boardroom {
    /// `assets.stake` is the share asset, `assets.reward` the primary asset.
    /// The deployer starts as owner and operator.
    pub fn new(assets: StakeAssets, deployer: AccountId) -> Self {
        Self {
            assets,
            state: RwLock::new(BoardroomState {
                authority: Authority::new(deployer),
                accrual: RewardAccrual::new(),
                undistributed: 0,
                events: Vec::new(),
            }),
        }
    }

    pub fn state(&self) -> BoardroomState {
        self.state.read().expect("RwLock poisoned").clone()
    }

    pub fn total_staked(&self) -> u128 {
        self.state.read().expect("RwLock poisoned").accrual.total_staked()
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.state
            .read()
            .expect("RwLock poisoned")
            .accrual
            .balance_of(account)
    }

    pub fn undistributed(&self) -> u128 {
        self.state.read().expect("RwLock poisoned").undistributed
    }

    /// Claimable seigniorage of `account`.
    pub fn earned(&self, account: &AccountId) -> Result<u128, LibraError> {
        let state = self.state.read().expect("RwLock poisoned");
        state
            .accrual
            .earned(account, state.accrual.reward_per_token_stored())
    }

    pub fn drain_events(&self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.state.write().expect("RwLock poisoned").events)
    }

    pub fn stake(&self, ctx: &ExecutionContext, amount: u128) -> Result<(), LibraError> {
        if amount == 0 {
            return Err(LibraError::ZeroAmount);
        }
        self.transact(|state| {
            state.accrual.checkpoint(0, Some(&ctx.caller))?;
            state.accrual.stake(&ctx.caller, amount)?;
            self.assets.pull_stake(&ctx.caller, amount)?;
            state.events.push(PoolEvent::Staked {
                account: ctx.caller.clone(),
                amount,
            });
            Ok(())
        })
    }

    pub fn withdraw(&self, ctx: &ExecutionContext, amount: u128) -> Result<(), LibraError> {
        if amount == 0 {
            return Err(LibraError::ZeroAmount);
        }
        self.transact(|state| {
            state.accrual.checkpoint(0, Some(&ctx.caller))?;
            state.accrual.withdraw(&ctx.caller, amount)?;
            self.assets.return_stake(&ctx.caller, amount)?;
            state.events.push(PoolEvent::Withdrawn {
                account: ctx.caller.clone(),
                amount,
            });
            Ok(())
        })
    }

    /// Pay out the caller's seigniorage. Returns the amount paid.
    pub fn claim_reward(&self, ctx: &ExecutionContext) -> Result<u128, LibraError> {
        self.transact(|state| {
            state.accrual.checkpoint(0, Some(&ctx.caller))?;
            self.pay_out(state, &ctx.caller)
        })
    }

    /// Withdraw the whole stake and claim. Returns the reward paid.
    pub fn exit(&self, ctx: &ExecutionContext) -> Result<u128, LibraError> {
        self.transact(|state| {
            let balance = state.accrual.balance_of(&ctx.caller);
            if balance == 0 {
                return Err(LibraError::ZeroAmount);
            }
            state.accrual.checkpoint(0, Some(&ctx.caller))?;
            state.accrual.withdraw(&ctx.caller, balance)?;
            state.events.push(PoolEvent::Withdrawn {
                account: ctx.caller.clone(),
                amount: balance,
            });
            self.assets
                .ensure_payout(state.accrual.settled_rewards(&ctx.caller), balance)?;
            let reward = self.pay_out(state, &ctx.caller)?;
            self.assets.return_stake(&ctx.caller, balance)?;
            Ok(reward)
        })
    }

    fn transact<T>(
        &self,
        f: impl FnOnce(&mut BoardroomState) -> Result<T, LibraError>,
    ) -> Result<T, LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        let saved = state.clone();
        let result = f(&mut *state);
        if result.is_err() {
            *state = saved;
        }
        result
    }

    fn pay_out(&self, state: &mut BoardroomState, account: &AccountId) -> Result<u128, LibraError> {
        let reward = state.accrual.take_reward(account);
        if reward > 0 {
            self.assets.pay_reward(account, reward)?;
            state.events.push(PoolEvent::RewardPaid {
                account: account.clone(),
                reward,
            });
        }
        Ok(reward)
    }
}

impl Operated for Boardroom {
    fn operator(&self) -> AccountId {
        self.state.read().expect("RwLock poisoned").authority.operator().clone()
    }

    fn owner(&self) -> AccountId {
        self.state.read().expect("RwLock poisoned").authority.owner().clone()
    }

    fn transfer_operator(
        &self,
        caller: &AccountId,
        new_operator: &AccountId,
    ) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.authority.transfer_operator(caller, new_operator.clone())?;
        tracing::info!("Boardroom operator transferred to {}", new_operator);
        Ok(())
    }

    fn transfer_ownership(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.authority.transfer_ownership(caller, new_owner.clone())?;
        tracing::info!("Boardroom ownership transferred to {}", new_owner);
        Ok(())
    }
}

impl SeigniorageReceiver for Boardroom {
    fn account(&self) -> AccountId {
        self.assets.custody.clone()
    }

    fn check_allocation(&self, caller: &AccountId, amount: u128) -> Result<(), LibraError> {
        let state = self.state.read().expect("RwLock poisoned");
        Self::allocation_precheck(&state, caller, amount).map(|_| ())
    }

    fn allocate_seigniorage(&self, caller: &AccountId, amount: u128) -> Result<(), LibraError> {
        self.transact(|state| {
            let pending = Self::allocation_precheck(state, caller, amount)?;
            if state.accrual.total_staked() == 0 {
                state.undistributed = pending;
                tracing::warn!("Boardroom has no stakers, holding {} for next allocation", pending);
            } else {
                state.accrual.checkpoint(pending, None)?;
                state.undistributed = 0;
            }
            self.assets
                .reward
                .transfer_from(&self.assets.custody, caller, &self.assets.custody, amount)?;
            state.events.push(PoolEvent::SeigniorageAllocated { amount });
            tracing::debug!("Boardroom received {} seigniorage", amount);
            Ok(())
        })
    }
}

impl Boardroom {
    /// Checks shared by `check_allocation` and `allocate_seigniorage`.
    /// Returns the amount to fold into the accumulator.
    fn allocation_precheck(
        state: &BoardroomState,
        caller: &AccountId,
        amount: u128,
    ) -> Result<u128, LibraError> {
        if amount == 0 {
            return Err(LibraError::ZeroAmount);
        }
        if caller != state.authority.operator() {
            return Err(LibraError::Unauthorized {
                caller: caller.clone(),
                role: Role::Operator,
            });
        }
        let pending = checked_add(state.undistributed, amount)?;
        state.accrual.reward_per_token(pending)?;
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use libra_core::traits::AssetLedger;
    use libra_core::WAD;
    use libra_ledger::InMemoryAsset;

    use super::*;

    struct Fixture {
        boardroom: Boardroom,
        share: Arc<InMemoryAsset>,
        libra: Arc<InMemoryAsset>,
    }

    fn acct(id: &str) -> AccountId {
        AccountId::new(id)
    }

    fn ctx(caller: &str) -> ExecutionContext {
        ExecutionContext::new(caller, 1_000, 100)
    }

    /// Boardroom operated by "treasury", which holds 10_000 LIBRA approved
    /// for the boardroom; alice and bob hold approved shares.
    fn fixture() -> Fixture {
        let deployer = acct("deployer");
        let share = Arc::new(InMemoryAsset::new("SHARE", deployer.clone()));
        let libra = Arc::new(InMemoryAsset::new("LIBRA", deployer.clone()));
        let custody = acct("boardroom");

        for holder in ["alice", "bob"] {
            share.mint(&deployer, &acct(holder), 100 * WAD).unwrap();
            share.approve(&acct(holder), &custody, u128::MAX).unwrap();
        }
        libra.mint(&deployer, &acct("treasury"), 10_000 * WAD).unwrap();
        libra
            .approve(&acct("treasury"), &custody, u128::MAX)
            .unwrap();

        let assets = StakeAssets {
            stake: share.clone(),
            reward: libra.clone(),
            custody,
        };
        let boardroom = Boardroom::new(assets, deployer.clone());
        boardroom
            .transfer_operator(&deployer, &acct("treasury"))
            .unwrap();
        Fixture {
            boardroom,
            share,
            libra,
        }
    }

    #[test]
    fn test_allocation_split_by_stake() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 30 * WAD).unwrap();
        f.boardroom.stake(&ctx("bob"), 10 * WAD).unwrap();
        f.boardroom
            .allocate_seigniorage(&acct("treasury"), 400 * WAD)
            .unwrap();

        assert_eq!(f.boardroom.earned(&acct("alice")).unwrap(), 300 * WAD);
        assert_eq!(f.boardroom.earned(&acct("bob")).unwrap(), 100 * WAD);
        assert_eq!(f.libra.balance_of(&acct("boardroom")), 400 * WAD);
    }

    #[test]
    fn test_allocation_requires_operator() {
        let f = fixture();
        let err = f
            .boardroom
            .allocate_seigniorage(&acct("mallory"), WAD)
            .unwrap_err();
        assert!(matches!(err, LibraError::Unauthorized { role: Role::Operator, .. }));
    }

    #[test]
    fn test_allocation_without_stakers_is_held() {
        let f = fixture();
        f.boardroom
            .allocate_seigniorage(&acct("treasury"), 50 * WAD)
            .unwrap();
        assert_eq!(f.boardroom.undistributed(), 50 * WAD);

        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        f.boardroom
            .allocate_seigniorage(&acct("treasury"), 50 * WAD)
            .unwrap();
        assert_eq!(f.boardroom.undistributed(), 0);
        assert_eq!(f.boardroom.earned(&acct("alice")).unwrap(), 100 * WAD);
    }

    #[test]
    fn test_late_staker_gets_nothing_from_earlier_allocation() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        f.boardroom
            .allocate_seigniorage(&acct("treasury"), 100 * WAD)
            .unwrap();
        f.boardroom.stake(&ctx("bob"), 10 * WAD).unwrap();
        assert_eq!(f.boardroom.earned(&acct("bob")).unwrap(), 0);
    }

    #[test]
    fn test_claim_pays_once() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        f.boardroom
            .allocate_seigniorage(&acct("treasury"), 100 * WAD)
            .unwrap();
        assert_eq!(f.boardroom.claim_reward(&ctx("alice")).unwrap(), 100 * WAD);
        assert_eq!(f.boardroom.claim_reward(&ctx("alice")).unwrap(), 0);
        assert_eq!(f.libra.balance_of(&acct("alice")), 100 * WAD);
    }

    #[test]
    fn test_exit_returns_shares() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        f.boardroom
            .allocate_seigniorage(&acct("treasury"), 7 * WAD)
            .unwrap();
        assert_eq!(f.boardroom.exit(&ctx("alice")).unwrap(), 7 * WAD);
        assert_eq!(f.share.balance_of(&acct("alice")), 100 * WAD);
        assert_eq!(f.boardroom.total_staked(), 0);
    }

    #[test]
    fn test_failed_allocation_rolls_back() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        let err = f
            .boardroom
            .allocate_seigniorage(&acct("treasury"), 20_000 * WAD)
            .unwrap_err();
        assert!(matches!(err, LibraError::InsufficientFunds { .. }));
        assert_eq!(f.boardroom.earned(&acct("alice")).unwrap(), 0);
        assert_eq!(f.boardroom.state().accrual.reward_per_token_stored(), 0);
    }

    #[test]
    fn test_check_allocation_moves_nothing() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        assert!(f.boardroom.check_allocation(&acct("treasury"), 5 * WAD).is_ok());
        assert!(matches!(
            f.boardroom.check_allocation(&acct("mallory"), 5 * WAD),
            Err(LibraError::Unauthorized { .. })
        ));
        assert_eq!(
            f.boardroom.check_allocation(&acct("treasury"), 0),
            Err(LibraError::ZeroAmount)
        );
        assert_eq!(f.libra.balance_of(&acct("boardroom")), 0);
        assert_eq!(f.boardroom.state().accrual.reward_per_token_stored(), 0);
    }

    #[test]
    fn test_exit_short_custody_pays_nothing() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        f.boardroom
            .allocate_seigniorage(&acct("treasury"), 7 * WAD)
            .unwrap();
        f.share
            .transfer(&acct("boardroom"), &acct("elsewhere"), 5 * WAD)
            .unwrap();

        assert!(matches!(
            f.boardroom.exit(&ctx("alice")),
            Err(LibraError::InsufficientFunds { .. })
        ));
        assert_eq!(f.libra.balance_of(&acct("alice")), 0);
        assert_eq!(f.boardroom.earned(&acct("alice")).unwrap(), 7 * WAD);
        assert_eq!(f.boardroom.balance_of(&acct("alice")), 10 * WAD);
    }

    #[test]
    fn test_withdraw_more_than_staked() {
        let f = fixture();
        f.boardroom.stake(&ctx("alice"), 10 * WAD).unwrap();
        let err = f.boardroom.withdraw(&ctx("alice"), 11 * WAD).unwrap_err();
        assert!(matches!(err, LibraError::InsufficientBalance { .. }));
        assert_eq!(f.boardroom.balance_of(&acct("alice")), 10 * WAD);
    }
}
