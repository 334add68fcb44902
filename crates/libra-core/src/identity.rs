// crates/libra-core/src/identity.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an account on the ledger.
///
/// Every participant is addressed by an `AccountId`: end users, the
/// treasury, pools, the boardroom, the fund, and the assets' owners.
/// Engines that hold custody of tokens (pools, treasury) are just accounts
/// like any other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
