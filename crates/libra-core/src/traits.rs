// crates/libra-core/src/traits.rs
//
// Narrow interfaces of the external collaborators the monetary engines
// consume. Implementations take `&self` and manage their own interior
// state so a single instance can be shared between the treasury, the
// pools, and the accounts that hold balances.

use crate::error::LibraError;
use crate::identity::AccountId;

/// Owner/operator control over a component.
pub trait Operated: Send + Sync {
    /// Current operator.
    fn operator(&self) -> AccountId;

    /// Current owner.
    fn owner(&self) -> AccountId;

    /// Hand the operator role to `new_operator`. Owner only.
    fn transfer_operator(&self, caller: &AccountId, new_operator: &AccountId)
        -> Result<(), LibraError>;

    /// Hand ownership to `new_owner`. Owner only.
    fn transfer_ownership(&self, caller: &AccountId, new_owner: &AccountId)
        -> Result<(), LibraError>;
}

/// Fungible asset ledger with privileged mint/burn.
///
/// Transfers move exact amounts with no fees.
pub trait AssetLedger: Operated {
    /// Ticker used in logs and oracle lookups.
    fn symbol(&self) -> &str;

    fn balance_of(&self, account: &AccountId) -> u128;

    fn total_supply(&self) -> u128;

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128;

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u128) -> Result<(), LibraError>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LibraError>;

    fn approve(&self, owner: &AccountId, spender: &AccountId, amount: u128)
        -> Result<(), LibraError>;

    /// Create `amount` new tokens for `to`. Operator only.
    fn mint(&self, minter: &AccountId, to: &AccountId, amount: u128) -> Result<(), LibraError>;

    /// Destroy `amount` of `from`'s tokens. Operator only; spends the
    /// operator's allowance from `from`.
    fn burn_from(&self, burner: &AccountId, from: &AccountId, amount: u128)
        -> Result<(), LibraError>;
}

/// Price source for the primary asset.
pub trait PriceOracle: Send + Sync {
    /// Value of `amount_in` units of `asset`, as a wad.
    fn consult(&self, asset: &str, amount_in: u128) -> Result<u128, LibraError>;

    /// Refresh the oracle's internal observation.
    fn update(&self) -> Result<(), LibraError>;
}

/// Development/contribution fund receiving a share of seigniorage.
pub trait SeigniorageFund: Send + Sync {
    /// Account the fund holds deposits under.
    fn account(&self) -> AccountId;

    /// Pull `amount` of `asset` from `depositor` (which must have approved
    /// the fund) and record it under `memo`.
    fn deposit(
        &self,
        depositor: &AccountId,
        asset: &dyn AssetLedger,
        amount: u128,
        memo: &str,
    ) -> Result<(), LibraError>;
}

/// Stakers' pool receiving the remainder of seigniorage (the boardroom).
pub trait SeigniorageReceiver: Operated {
    /// Account the receiver holds its balances under.
    fn account(&self) -> AccountId;

    /// Return the error `allocate_seigniorage` would fail with for
    /// `caller` and `amount`, without moving anything. Balance and
    /// allowance of `caller` are not checked.
    fn check_allocation(&self, caller: &AccountId, amount: u128) -> Result<(), LibraError>;

    /// Pull `amount` of the primary asset from `caller` and distribute it
    /// to stakers. Operator only.
    fn allocate_seigniorage(&self, caller: &AccountId, amount: u128) -> Result<(), LibraError>;
}
