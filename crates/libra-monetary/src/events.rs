// crates/libra-monetary/src/events.rs
//
// Records emitted by the monetary engines.
//
// Events are appended to the emitting engine's state, so they roll back
// together with any call that fails. Callers collect them with
// `drain_events()`.

use serde::{Deserialize, Serialize};

use libra_core::identity::AccountId;

/// Events emitted by a reward pool or the boardroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    /// A new emission period was funded or a halving reset the rate.
    RewardAdded { reward: u128 },
    Staked { account: AccountId, amount: u128 },
    Withdrawn { account: AccountId, amount: u128 },
    RewardPaid { account: AccountId, reward: u128 },
    /// The boardroom received seigniorage to distribute.
    SeigniorageAllocated { amount: u128 },
}

/// Events emitted by the treasury.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasuryEvent {
    Initialized { operator: AccountId, block: u64 },
    Migration { target: AccountId },
    FundChanged { operator: AccountId, fund: AccountId },
    FundAllocationRateChanged { operator: AccountId, rate: u8 },
    BondOracleChanged { operator: AccountId },
    SeigniorageOracleChanged { operator: AccountId },
    EpochPeriodChanged { operator: AccountId, period: u64 },
    BoughtBonds { account: AccountId, amount: u128, bonds: u128 },
    RedeemedBonds { account: AccountId, amount: u128 },
    /// Seigniorage leg paid to the contribution fund.
    FundFunded { timestamp: u64, amount: u128 },
    /// Seigniorage leg kept as the bond-redemption reserve.
    TreasuryFunded { timestamp: u64, amount: u128 },
    /// Seigniorage leg sent to the boardroom.
    BoardroomFunded { timestamp: u64, amount: u128 },
}
