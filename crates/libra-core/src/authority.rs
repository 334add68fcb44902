// crates/libra-core/src/authority.rs
//
// Owner/operator capability checks.
//
// Privileged entry points compare the caller in the execution context
// against a stored authority identifier. The owner may hand over either
// role; the operator runs day-to-day privileged calls.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::error::LibraError;
use crate::identity::AccountId;

/// Roles a privileged entry point may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Operator,
    /// Account allowed to fund a reward pool.
    RewardDistributor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Operator => write!(f, "operator"),
            Role::RewardDistributor => write!(f, "reward distributor"),
        }
    }
}

/// Fail with `Unauthorized` unless the caller is `holder`.
pub fn require_authority(
    ctx: &ExecutionContext,
    holder: &AccountId,
    role: Role,
) -> Result<(), LibraError> {
    if &ctx.caller != holder {
        return Err(LibraError::Unauthorized {
            caller: ctx.caller.clone(),
            role,
        });
    }
    Ok(())
}

/// Stored owner and operator of a privileged component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    owner: AccountId,
    operator: AccountId,
}

impl Authority {
    /// Both roles start with the deployer.
    pub fn new(deployer: AccountId) -> Self {
        Self {
            owner: deployer.clone(),
            operator: deployer,
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn operator(&self) -> &AccountId {
        &self.operator
    }

    /// Check the caller holds `role`. `RewardDistributor` is not tracked
    /// here and is always rejected.
    pub fn require(&self, ctx: &ExecutionContext, role: Role) -> Result<(), LibraError> {
        match role {
            Role::Owner => require_authority(ctx, &self.owner, role),
            Role::Operator => require_authority(ctx, &self.operator, role),
            Role::RewardDistributor => Err(LibraError::Unauthorized {
                caller: ctx.caller.clone(),
                role,
            }),
        }
    }

    /// Owner-only.
    pub fn transfer_operator(
        &mut self,
        caller: &AccountId,
        new_operator: AccountId,
    ) -> Result<(), LibraError> {
        self.require_owner(caller)?;
        self.operator = new_operator;
        Ok(())
    }

    /// Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), LibraError> {
        self.require_owner(caller)?;
        self.owner = new_owner;
        Ok(())
    }

    fn require_owner(&self, caller: &AccountId) -> Result<(), LibraError> {
        if caller != &self.owner {
            return Err(LibraError::Unauthorized {
                caller: caller.clone(),
                role: Role::Owner,
            });
        }
        Ok(())
    }
}
