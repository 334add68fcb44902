use thiserror::Error;

use crate::authority::Role;
use crate::identity::AccountId;

/// Protocol-wide error types for the Libra monetary protocol.
///
/// Every error aborts the call that produced it; engines roll back their
/// own state before returning one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraError {
    /// Caller does not hold the role the entry point requires.
    #[error("Unauthorized: {caller} is not the {role}")]
    Unauthorized { caller: AccountId, role: Role },

    /// The engine lacks operator control over a collaborator it manages.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// One-shot initialization already ran.
    #[error("Already initialized")]
    AlreadyInitialized,

    /// The engine was migrated; all mutating calls are disabled.
    #[error("Already migrated")]
    AlreadyMigrated,

    /// Call arrived before the configured start time.
    #[error("Not started: opens at {start_time}, now {now}")]
    NotStarted { start_time: u64, now: u64 },

    /// The current epoch has not elapsed yet.
    #[error("Epoch not elapsed: next epoch point is {next_epoch_point}, now {now}")]
    EpochNotElapsed { next_epoch_point: u64, now: u64 },

    /// The caller already completed a protected call in this block.
    #[error("Reentrant call: {caller} already acted in block {block}")]
    ReentrantCall { caller: AccountId, block: u64 },

    /// Oracle price differs from the price the caller quoted.
    #[error("Price moved: quoted {target}, oracle reports {actual}")]
    PriceMoved { target: u128, actual: u128 },

    /// Bonds can only be bought below peg.
    #[error("Price {price} is not below the bond threshold {threshold}")]
    AboveBondThreshold { price: u128, threshold: u128 },

    /// Bonds can only be redeemed above the ceiling.
    #[error("Price {price} is not above the ceiling {ceiling}")]
    BelowCeiling { price: u128, ceiling: u128 },

    /// Treasury holds less of the primary asset than requested.
    #[error("Insufficient budget: requested {requested}, treasury holds {available}")]
    InsufficientBudget { requested: u128, available: u128 },

    /// Amount argument must be non-zero.
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// Withdrawal larger than the caller's stake.
    #[error("Insufficient balance: requested {requested}, staked {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    /// Ledger transfer or burn larger than the holder's balance.
    #[error("Insufficient {asset} funds for {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        asset: String,
        account: AccountId,
        requested: u128,
        available: u128,
    },

    /// `transfer_from` / `burn_from` larger than the approved allowance.
    #[error("Insufficient {asset} allowance for {spender}: requested {requested}, approved {approved}")]
    InsufficientAllowance {
        asset: String,
        spender: AccountId,
        requested: u128,
        approved: u128,
    },

    /// Price oracle failed to answer or refresh.
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Fixed-point overflow or division by zero.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Rejected parameter value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of errors, used by callers to decide whether to
/// resubmit, re-quote, or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller or engine lacks authority. Fatal to the call.
    PermissionDenied,
    /// Wait and resubmit later.
    PreconditionFailed,
    /// One-way transition already taken. Never retried.
    InvariantViolation,
    /// Market moved or budget exhausted. Re-quote and retry.
    MarketCondition,
    /// Bad caller input.
    InvalidInput,
    /// Collaborator or arithmetic failure.
    External,
}

impl LibraError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LibraError::Unauthorized { .. } | LibraError::PermissionDenied(_) => {
                ErrorKind::PermissionDenied
            }
            LibraError::NotStarted { .. }
            | LibraError::EpochNotElapsed { .. }
            | LibraError::ReentrantCall { .. } => ErrorKind::PreconditionFailed,
            LibraError::AlreadyInitialized | LibraError::AlreadyMigrated => {
                ErrorKind::InvariantViolation
            }
            LibraError::PriceMoved { .. }
            | LibraError::AboveBondThreshold { .. }
            | LibraError::BelowCeiling { .. }
            | LibraError::InsufficientBudget { .. } => ErrorKind::MarketCondition,
            LibraError::ZeroAmount
            | LibraError::InsufficientBalance { .. }
            | LibraError::InsufficientFunds { .. }
            | LibraError::InsufficientAllowance { .. }
            | LibraError::InvalidConfig(_) => ErrorKind::InvalidInput,
            LibraError::Oracle(_) | LibraError::Arithmetic(_) | LibraError::Serialization(_) => {
                ErrorKind::External
            }
        }
    }

    /// Whether resubmitting the same call later can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::PreconditionFailed | ErrorKind::MarketCondition
        )
    }
}

impl From<serde_json::Error> for LibraError {
    fn from(e: serde_json::Error) -> Self {
        LibraError::Serialization(e.to_string())
    }
}
