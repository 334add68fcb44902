// crates/libra-ledger/src/asset.rs
//
// In-memory fungible asset implementing `AssetLedger`.
//
// Balances, allowances, and total supply live behind a single RwLock so
// every call observes a fully-settled state and applies its writes as a
// unit. Mint and burn are reserved for the operator; handing over the
// operator or owner role is reserved for the owner.

use std::collections::BTreeMap;
use std::sync::RwLock;

use libra_core::authority::Authority;
use libra_core::error::LibraError;
use libra_core::identity::AccountId;
use libra_core::math::{checked_add, checked_sub};
use libra_core::traits::{AssetLedger, Operated};
use libra_core::Role;

#[derive(Debug)]
struct AssetState {
    authority: Authority,
    total_supply: u128,
    balances: BTreeMap<AccountId, u128>,
    /// (owner, spender) -> remaining allowance.
    allowances: BTreeMap<(AccountId, AccountId), u128>,
}

/// An in-memory fungible asset.
#[derive(Debug)]
pub struct InMemoryAsset {
    symbol: String,
    state: RwLock<AssetState>,
}

impl InMemoryAsset {
    /// Create an empty asset. The deployer starts as owner and operator.
    pub fn new(symbol: impl Into<String>, deployer: AccountId) -> Self {
        Self {
            symbol: symbol.into(),
            state: RwLock::new(AssetState {
                authority: Authority::new(deployer),
                total_supply: 0,
                balances: BTreeMap::new(),
                allowances: BTreeMap::new(),
            }),
        }
    }
}

impl AssetState {
    fn balance(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn debit(&mut self, symbol: &str, account: &AccountId, amount: u128) -> Result<(), LibraError> {
        let available = self.balance(account);
        if amount > available {
            return Err(LibraError::InsufficientFunds {
                asset: symbol.to_string(),
                account: account.clone(),
                requested: amount,
                available,
            });
        }
        self.balances.insert(account.clone(), available - amount);
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, amount: u128) -> Result<(), LibraError> {
        let balance = checked_add(self.balance(account), amount)?;
        self.balances.insert(account.clone(), balance);
        Ok(())
    }

    fn spend_allowance(
        &mut self,
        symbol: &str,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), LibraError> {
        let key = (owner.clone(), spender.clone());
        let approved = self.allowances.get(&key).copied().unwrap_or(0);
        if amount > approved {
            return Err(LibraError::InsufficientAllowance {
                asset: symbol.to_string(),
                spender: spender.clone(),
                requested: amount,
                approved,
            });
        }
        self.allowances.insert(key, approved - amount);
        Ok(())
    }

    fn require_operator(&self, caller: &AccountId) -> Result<(), LibraError> {
        if caller != self.authority.operator() {
            return Err(LibraError::Unauthorized {
                caller: caller.clone(),
                role: Role::Operator,
            });
        }
        Ok(())
    }

    /// Check every precondition of a debit before touching any entry.
    fn ensure_funds(&self, symbol: &str, account: &AccountId, amount: u128) -> Result<(), LibraError> {
        let available = self.balance(account);
        if amount > available {
            return Err(LibraError::InsufficientFunds {
                asset: symbol.to_string(),
                account: account.clone(),
                requested: amount,
                available,
            });
        }
        Ok(())
    }
}

impl Operated for InMemoryAsset {
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
        tracing::debug!("{} operator transferred to {}", self.symbol, new_operator);
        Ok(())
    }

    fn transfer_ownership(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.authority.transfer_ownership(caller, new_owner.clone())?;
        tracing::debug!("{} ownership transferred to {}", self.symbol, new_owner);
        Ok(())
    }
}

impl AssetLedger for InMemoryAsset {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn balance_of(&self, account: &AccountId) -> u128 {
        self.state.read().expect("RwLock poisoned").balance(account)
    }

    fn total_supply(&self) -> u128 {
        self.state.read().expect("RwLock poisoned").total_supply
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.state
            .read()
            .expect("RwLock poisoned")
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u128) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.debit(&self.symbol, from, amount)?;
        state.credit(to, amount)?;
        Ok(())
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.ensure_funds(&self.symbol, from, amount)?;
        state.spend_allowance(&self.symbol, from, spender, amount)?;
        state.debit(&self.symbol, from, amount)?;
        state.credit(to, amount)?;
        Ok(())
    }

    fn approve(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
        Ok(())
    }

    fn mint(&self, minter: &AccountId, to: &AccountId, amount: u128) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.require_operator(minter)?;
        let supply = checked_add(state.total_supply, amount)?;
        state.credit(to, amount)?;
        state.total_supply = supply;
        tracing::debug!("Minted {} {} to {}", amount, self.symbol, to);
        Ok(())
    }

    fn burn_from(
        &self,
        burner: &AccountId,
        from: &AccountId,
        amount: u128,
    ) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.require_operator(burner)?;
        state.ensure_funds(&self.symbol, from, amount)?;
        if burner != from {
            state.spend_allowance(&self.symbol, from, burner, amount)?;
        }
        state.debit(&self.symbol, from, amount)?;
        state.total_supply = checked_sub(state.total_supply, amount)?;
        tracing::debug!("Burned {} {} from {}", amount, self.symbol, from);
        Ok(())
    }
}
