// crates/libra-ledger/src/lib.rs
//
// libra-ledger: In-memory collaborators for the Libra monetary protocol.
//
// Provides a fungible asset ledger, a manually driven price oracle, and a
// simple contribution fund. These implement the narrow traits from
// libra-core so the monetary engines can run end-to-end in tests and in
// the simulator without a live chain.

pub mod asset;
pub mod fund;
pub mod oracle;

// Re-export key types for ergonomic access from downstream crates.
pub use asset::InMemoryAsset;
pub use fund::{FundMovement, FundRecord, SimpleFund};
pub use oracle::ManualOracle;
