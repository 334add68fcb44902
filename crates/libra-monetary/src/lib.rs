// crates/libra-monetary/src/lib.rs
//
// libra-monetary: Monetary-policy engines of the Libra protocol.
//
// The treasury expands and contracts primary supply from oracle price
// signals, gated to one allocation per epoch and one market call per
// caller per block. Reward pools stream emitted share tokens to liquidity
// stakers with usage-driven halving, and the boardroom distributes
// expansion seigniorage to share stakers. Both pools share one
// reward-per-token accrual ledger.

pub mod accrual;
pub mod boardroom;
pub mod distributor;
pub mod epoch;
pub mod events;
pub mod guard;
pub mod pool;
pub mod treasury;

// Re-export key types for ergonomic access from downstream crates.
pub use accrual::{RewardAccrual, StakeAssets};
pub use boardroom::{Boardroom, BoardroomState};
pub use distributor::InitialDistributor;
pub use epoch::EpochGate;
pub use events::{PoolEvent, TreasuryEvent};
pub use guard::OneCallPerBlockGuard;
pub use pool::{PoolConfig, PoolState, RewardPool, DEFAULT_DURATION};
pub use treasury::{SeigniorageSplit, Treasury, TreasuryConfig, TreasuryHandles, TreasuryState};
