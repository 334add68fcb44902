// crates/libra-ledger/src/fund.rs
//
// Simple contribution fund implementing `SeigniorageFund`.
//
// Deposits are pulled from the depositor with `transfer_from` and
// recorded with their memo. Only the operator may withdraw.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use libra_core::authority::Authority;
use libra_core::context::ExecutionContext;
use libra_core::error::LibraError;
use libra_core::identity::AccountId;
use libra_core::traits::{AssetLedger, SeigniorageFund};
use libra_core::Role;

/// Direction of a fund movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundMovement {
    Deposit,
    Withdrawal,
}

/// One recorded movement of funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundRecord {
    pub movement: FundMovement,
    /// The depositor, or the withdrawal recipient.
    pub counterparty: AccountId,
    pub asset: String,
    pub amount: u128,
    pub memo: String,
}

/// A fund that accepts deposits from anyone and pays out on operator order.
#[derive(Debug)]
pub struct SimpleFund {
    account: AccountId,
    authority: RwLock<Authority>,
    records: RwLock<Vec<FundRecord>>,
}

impl SimpleFund {
    pub fn new(account: AccountId, operator: AccountId) -> Self {
        Self {
            account,
            authority: RwLock::new(Authority::new(operator)),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Send `amount` of `asset` held by the fund to `to`. Operator only.
    pub fn withdraw(
        &self,
        ctx: &ExecutionContext,
        asset: &dyn AssetLedger,
        amount: u128,
        to: &AccountId,
        memo: &str,
    ) -> Result<(), LibraError> {
        self.authority
            .read()
            .expect("RwLock poisoned")
            .require(ctx, Role::Operator)?;
        asset.transfer(&self.account, to, amount)?;
        self.records.write().expect("RwLock poisoned").push(FundRecord {
            movement: FundMovement::Withdrawal,
            counterparty: to.clone(),
            asset: asset.symbol().to_string(),
            amount,
            memo: memo.to_string(),
        });
        tracing::info!("Fund withdrew {} {} to {}: {}", amount, asset.symbol(), to, memo);
        Ok(())
    }

    /// All recorded movements, oldest first.
    pub fn records(&self) -> Vec<FundRecord> {
        self.records.read().expect("RwLock poisoned").clone()
    }

    /// Sum of deposits of `asset`.
    pub fn total_deposited(&self, asset: &str) -> u128 {
        self.records
            .read()
            .expect("RwLock poisoned")
            .iter()
            .filter(|r| r.movement == FundMovement::Deposit && r.asset == asset)
            .map(|r| r.amount)
            .sum()
    }
}

impl SeigniorageFund for SimpleFund {
    fn account(&self) -> AccountId {
        self.account.clone()
    }

    fn deposit(
        &self,
        depositor: &AccountId,
        asset: &dyn AssetLedger,
        amount: u128,
        memo: &str,
    ) -> Result<(), LibraError> {
        asset.transfer_from(&self.account, depositor, &self.account, amount)?;
        self.records.write().expect("RwLock poisoned").push(FundRecord {
            movement: FundMovement::Deposit,
            counterparty: depositor.clone(),
            asset: asset.symbol().to_string(),
            amount,
            memo: memo.to_string(),
        });
        tracing::debug!("Fund received {} {} from {}: {}", amount, asset.symbol(), depositor, memo);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::InMemoryAsset;

    fn acct(id: &str) -> AccountId {
        AccountId::new(id)
    }

    fn setup() -> (SimpleFund, InMemoryAsset) {
        let asset = InMemoryAsset::new("LIBRA", acct("deployer"));
        asset.mint(&acct("deployer"), &acct("treasury"), 500).unwrap();
        (SimpleFund::new(acct("fund"), acct("dev")), asset)
    }

    #[test]
    fn test_deposit_pulls_with_allowance() {
        let (fund, asset) = setup();
        asset.approve(&acct("treasury"), &acct("fund"), 200).unwrap();
        fund.deposit(&acct("treasury"), &asset, 200, "seigniorage").unwrap();

        assert_eq!(asset.balance_of(&acct("fund")), 200);
        assert_eq!(fund.total_deposited("LIBRA"), 200);
        assert_eq!(fund.records()[0].memo, "seigniorage");
    }

    #[test]
    fn test_deposit_without_allowance_fails() {
        let (fund, asset) = setup();
        assert!(fund.deposit(&acct("treasury"), &asset, 1, "x").is_err());
        assert!(fund.records().is_empty());
    }

    #[test]
    fn test_withdraw_operator_only() {
        let (fund, asset) = setup();
        asset.approve(&acct("treasury"), &acct("fund"), 200).unwrap();
        fund.deposit(&acct("treasury"), &asset, 200, "seigniorage").unwrap();

        let stranger = ExecutionContext::new("mallory", 0, 0);
        assert!(fund
            .withdraw(&stranger, &asset, 50, &acct("mallory"), "grant")
            .is_err());

        let dev = ExecutionContext::new("dev", 0, 0);
        fund.withdraw(&dev, &asset, 50, &acct("auditor"), "audit").unwrap();
        assert_eq!(asset.balance_of(&acct("auditor")), 50);
        assert_eq!(fund.records().len(), 2);
        assert_eq!(fund.total_deposited("LIBRA"), 200);
    }
}
