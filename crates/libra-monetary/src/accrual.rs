// crates/libra-monetary/src/accrual.rs
//
// Per-token reward accrual shared by the LP reward pool and the boardroom.
//
// Rewards are tracked with a global accumulator: how many reward tokens
// (as a wad) one staked token has earned since genesis. Each staker keeps
// a checkpoint of the accumulator at their last interaction, so their
// entitlement is
//
//   earned = balance * (reward_per_token - paid) / 1e18 + rewards
//
// Callers supply "pending" reward tokens that have not been folded into
// the accumulator yet: the streamed amount since the last update for the
// pool, or a lump-sum allocation for the boardroom. The checkpoint must
// run before any balance change so accrual up to now uses the old balance.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use libra_core::error::LibraError;
use libra_core::identity::AccountId;
use libra_core::math::{checked_add, checked_sub, mul_div};
use libra_core::traits::AssetLedger;
use libra_core::WAD;

/// Stake balances and reward checkpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardAccrual {
    /// Sum of all balances.
    total_staked: u128,
    balances: BTreeMap<AccountId, u128>,
    /// Accumulated reward per staked token, as a wad. Never decreases.
    reward_per_token_stored: u128,
    user_reward_per_token_paid: BTreeMap<AccountId, u128>,
    /// Settled but unclaimed rewards.
    rewards: BTreeMap<AccountId, u128>,
}

impl RewardAccrual {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Non-zero stake balances.
    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, u128)> {
        self.balances.iter().map(|(a, b)| (a, *b))
    }

    pub fn reward_per_token_stored(&self) -> u128 {
        self.reward_per_token_stored
    }

    pub fn reward_per_token_paid(&self, account: &AccountId) -> u128 {
        self.user_reward_per_token_paid
            .get(account)
            .copied()
            .unwrap_or(0)
    }

    /// Rewards settled at the account's last checkpoint.
    pub fn settled_rewards(&self, account: &AccountId) -> u128 {
        self.rewards.get(account).copied().unwrap_or(0)
    }

    /// The accumulator after folding in `pending` reward tokens.
    ///
    /// With nothing staked there is nobody to credit and the accumulator
    /// stays where it is.
    pub fn reward_per_token(&self, pending: u128) -> Result<u128, LibraError> {
        if self.total_staked == 0 {
            return Ok(self.reward_per_token_stored);
        }
        checked_add(
            self.reward_per_token_stored,
            mul_div(pending, WAD, self.total_staked)?,
        )
    }

    /// Total entitlement of `account` against a given accumulator value.
    pub fn earned(&self, account: &AccountId, reward_per_token: u128) -> Result<u128, LibraError> {
        let delta = checked_sub(reward_per_token, self.reward_per_token_paid(account))?;
        checked_add(
            mul_div(self.balance_of(account), delta, WAD)?,
            self.settled_rewards(account),
        )
    }

    /// Fold `pending` into the accumulator, then settle `account` if given.
    pub fn checkpoint(&mut self, pending: u128, account: Option<&AccountId>) -> Result<(), LibraError> {
        self.reward_per_token_stored = self.reward_per_token(pending)?;
        if let Some(account) = account {
            let earned = self.earned(account, self.reward_per_token_stored)?;
            self.rewards.insert(account.clone(), earned);
            self.user_reward_per_token_paid
                .insert(account.clone(), self.reward_per_token_stored);
        }
        Ok(())
    }

    pub fn stake(&mut self, account: &AccountId, amount: u128) -> Result<(), LibraError> {
        let total = checked_add(self.total_staked, amount)?;
        let balance = checked_add(self.balance_of(account), amount)?;
        self.total_staked = total;
        self.balances.insert(account.clone(), balance);
        Ok(())
    }

    /// # Errors
    /// Returns `LibraError::InsufficientBalance` if `amount` exceeds the stake.
    pub fn withdraw(&mut self, account: &AccountId, amount: u128) -> Result<(), LibraError> {
        let available = self.balance_of(account);
        if amount > available {
            return Err(LibraError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        self.total_staked -= amount;
        if available == amount {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), available - amount);
        }
        Ok(())
    }

    /// Zero the account's settled rewards and return what they were.
    pub fn take_reward(&mut self, account: &AccountId) -> u128 {
        self.rewards.remove(account).unwrap_or(0)
    }
}

/// The two assets an accrual engine moves, and the account holding custody.
#[derive(Clone)]
pub struct StakeAssets {
    /// Asset stakers deposit.
    pub stake: Arc<dyn AssetLedger>,
    /// Asset paid out as reward.
    pub reward: Arc<dyn AssetLedger>,
    /// Account the engine holds both assets under.
    pub custody: AccountId,
}

impl fmt::Debug for StakeAssets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StakeAssets")
            .field("stake", &self.stake.symbol())
            .field("reward", &self.reward.symbol())
            .field("custody", &self.custody)
            .finish()
    }
}

impl StakeAssets {
    /// Pull stake from `from`, which must have approved the custody account.
    pub fn pull_stake(&self, from: &AccountId, amount: u128) -> Result<(), LibraError> {
        self.stake
            .transfer_from(&self.custody, from, &self.custody, amount)
    }

    pub fn return_stake(&self, to: &AccountId, amount: u128) -> Result<(), LibraError> {
        self.stake.transfer(&self.custody, to, amount)
    }

    pub fn pay_reward(&self, to: &AccountId, amount: u128) -> Result<(), LibraError> {
        self.reward.transfer(&self.custody, to, amount)
    }

    /// Fail unless custody covers a `reward` payout and a `stake` return
    /// together. Assets sharing a symbol are treated as one ledger.
    pub fn ensure_payout(&self, reward: u128, stake: u128) -> Result<(), LibraError> {
        let legs = if self.reward.symbol() == self.stake.symbol() {
            vec![(&self.stake, checked_add(stake, reward)?)]
        } else {
            vec![(&self.stake, stake), (&self.reward, reward)]
        };
        for (asset, amount) in legs {
            let available = asset.balance_of(&self.custody);
            if amount > available {
                return Err(LibraError::InsufficientFunds {
                    asset: asset.symbol().to_string(),
                    account: self.custody.clone(),
                    requested: amount,
                    available,
                });
            }
        }
        Ok(())
    }
}
