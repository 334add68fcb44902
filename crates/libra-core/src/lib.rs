// crates/libra-core/src/lib.rs
//
// libra-core: Core types, errors, collaborator traits, and fixed-point math
// for the Libra monetary protocol.
//
// This is the leaf crate that all other crates in the workspace depend on.
// All amounts are u128 integers; prices and per-token accumulators are
// 18-decimal fixed-point wads.

pub mod authority;
pub mod context;
pub mod error;
pub mod identity;
pub mod math;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
pub use authority::{require_authority, Authority, Role};
pub use context::ExecutionContext;
pub use error::{ErrorKind, LibraError};
pub use identity::AccountId;
pub use math::WAD;
pub use traits::{AssetLedger, Operated, PriceOracle, SeigniorageFund, SeigniorageReceiver};
