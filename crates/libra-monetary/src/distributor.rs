// crates/libra-monetary/src/distributor.rs
//
// One-shot initial distribution of reward tokens into the reward pools.
//
// The distributor holds the pre-committed genesis emission. `distribute`
// moves each pool's allocation into the pool's custody and notifies the
// pool, acting as its reward distributor. It can run exactly once.

use std::collections::BTreeMap;
use std::sync::Arc;

use libra_core::context::ExecutionContext;
use libra_core::error::LibraError;
use libra_core::identity::AccountId;
use libra_core::math::{checked_add, format_wad};
use libra_core::traits::AssetLedger;

use crate::pool::RewardPool;

pub struct InitialDistributor {
    account: AccountId,
    reward: Arc<dyn AssetLedger>,
    /// Pool name -> reward tokens to seed it with.
    allocations: BTreeMap<String, u128>,
    distributed: bool,
}

impl std::fmt::Debug for InitialDistributor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitialDistributor")
            .field("account", &self.account)
            .field("reward", &self.reward.symbol())
            .field("allocations", &self.allocations)
            .field("distributed", &self.distributed)
            .finish()
    }
}

impl InitialDistributor {
    pub fn new(
        account: AccountId,
        reward: Arc<dyn AssetLedger>,
        allocations: BTreeMap<String, u128>,
    ) -> Self {
        Self {
            account,
            reward,
            allocations,
            distributed: false,
        }
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn is_distributed(&self) -> bool {
        self.distributed
    }

    pub fn total_allocation(&self) -> Result<u128, LibraError> {
        self.allocations
            .values()
            .try_fold(0u128, |acc, amount| checked_add(acc, *amount))
    }

    /// Seed every pool with its allocation and start its emission.
    ///
    /// Every pool must have an allocation and must accept this distributor
    /// as its reward distributor; both are checked before any transfer.
    pub fn distribute(
        &mut self,
        ctx: &ExecutionContext,
        pools: &mut [&mut RewardPool],
    ) -> Result<(), LibraError> {
        if self.distributed {
            return Err(LibraError::AlreadyInitialized);
        }

        let total = self.total_allocation()?;
        let available = self.reward.balance_of(&self.account);
        if available < total {
            return Err(LibraError::InsufficientFunds {
                asset: self.reward.symbol().to_string(),
                account: self.account.clone(),
                requested: total,
                available,
            });
        }
        for pool in pools.iter() {
            if !self.allocations.contains_key(pool.name()) {
                return Err(LibraError::InvalidConfig(format!(
                    "no allocation for pool {}",
                    pool.name()
                )));
            }
            if pool.state().reward_distribution != self.account {
                return Err(LibraError::PermissionDenied(format!(
                    "distributor is not reward distribution of pool {}",
                    pool.name()
                )));
            }
        }

        let as_distributor = ctx.with_caller(self.account.clone());
        for pool in pools.iter_mut() {
            let amount = self.allocations[pool.name()];
            self.reward.transfer(&self.account, pool.custody(), amount)?;
            pool.notify_reward_amount(&as_distributor, amount)?;
            tracing::info!(
                "Distributed {} {} to pool {}",
                format_wad(amount),
                self.reward.symbol(),
                pool.name()
            );
        }

        self.distributed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use libra_core::WAD;
    use libra_ledger::InMemoryAsset;

    use super::*;
    use crate::accrual::StakeAssets;
    use crate::pool::{PoolConfig, DEFAULT_DURATION};

    const START: u64 = 1_000_000;

    fn acct(id: &str) -> AccountId {
        AccountId::new(id)
    }

    fn pool(name: &str, lp: &Arc<InMemoryAsset>, share: &Arc<InMemoryAsset>) -> RewardPool {
        let assets = StakeAssets {
            stake: lp.clone(),
            reward: share.clone(),
            custody: acct(&format!("pool-{}", name)),
        };
        let config = PoolConfig {
            duration: DEFAULT_DURATION,
            init_reward: 624_000 * WAD,
            start_time: START,
        };
        RewardPool::new(name, config, assets, acct("deployer")).unwrap()
    }

    fn setup() -> (InitialDistributor, RewardPool, RewardPool, Arc<InMemoryAsset>) {
        let deployer = acct("deployer");
        let lp = Arc::new(InMemoryAsset::new("LP", deployer.clone()));
        let share = Arc::new(InMemoryAsset::new("SHARE", deployer.clone()));
        share
            .mint(&deployer, &acct("distributor"), 1_000_000 * WAD)
            .unwrap();

        let mut a = pool("a", &lp, &share);
        let mut b = pool("b", &lp, &share);
        let ctx = ExecutionContext::new("deployer", 0, 0);
        a.set_reward_distribution(&ctx, acct("distributor")).unwrap();
        b.set_reward_distribution(&ctx, acct("distributor")).unwrap();

        let allocations = BTreeMap::from([
            ("a".to_string(), 624_000 * WAD),
            ("b".to_string(), 376_000 * WAD),
        ]);
        let distributor = InitialDistributor::new(acct("distributor"), share.clone(), allocations);
        (distributor, a, b, share)
    }

    #[test]
    fn test_distribute_seeds_pools() {
        let (mut distributor, mut a, mut b, share) = setup();
        let ctx = ExecutionContext::new("anyone", START - 10, 1);
        distributor.distribute(&ctx, &mut [&mut a, &mut b]).unwrap();

        assert!(distributor.is_distributed());
        assert_eq!(share.balance_of(&acct("pool-a")), 624_000 * WAD);
        assert_eq!(share.balance_of(&acct("pool-b")), 376_000 * WAD);
        assert_eq!(share.balance_of(&acct("distributor")), 0);
        assert_eq!(a.period_finish(), START + DEFAULT_DURATION);
    }

    #[test]
    fn test_distribute_twice() {
        let (mut distributor, mut a, mut b, _) = setup();
        let ctx = ExecutionContext::new("anyone", START - 10, 1);
        distributor.distribute(&ctx, &mut [&mut a, &mut b]).unwrap();
        assert_eq!(
            distributor.distribute(&ctx, &mut [&mut a, &mut b]),
            Err(LibraError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_unknown_pool_moves_nothing() {
        let (mut distributor, mut a, _, share) = setup();
        let lp = Arc::new(InMemoryAsset::new("LP2", acct("deployer")));
        let mut stray = pool("stray", &lp, &share);
        let ctx = ExecutionContext::new("anyone", START - 10, 1);
        assert!(matches!(
            distributor.distribute(&ctx, &mut [&mut a, &mut stray]),
            Err(LibraError::InvalidConfig(_))
        ));
        assert!(!distributor.is_distributed());
        assert_eq!(share.balance_of(&acct("pool-a")), 0);
    }

    #[test]
    fn test_underfunded_distributor() {
        let (mut distributor, mut a, mut b, share) = setup();
        share
            .transfer(&acct("distributor"), &acct("elsewhere"), WAD)
            .unwrap();
        let ctx = ExecutionContext::new("anyone", START - 10, 1);
        assert!(matches!(
            distributor.distribute(&ctx, &mut [&mut a, &mut b]),
            Err(LibraError::InsufficientFunds { .. })
        ));
    }
}
