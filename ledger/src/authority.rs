//! Privileged-role handling.
//!
//! The authority is stored as plain data and every privileged operation
//! takes the caller's address as an explicit argument checked against it —
//! there is no ambient-caller lookup anywhere in the ledger.

use granary_types::AccountAddress;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Holder of the parameter-setting capability.
///
/// `None` after renunciation; privileged operations are then permanently
/// unavailable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    owner: Option<AccountAddress>,
}

impl Authority {
    pub fn new(owner: AccountAddress) -> Self {
        Self { owner: Some(owner) }
    }

    /// An authority nobody holds.
    pub fn renounced() -> Self {
        Self { owner: None }
    }

    pub fn owner(&self) -> Option<&AccountAddress> {
        self.owner.as_ref()
    }

    /// Check that `caller` currently holds the capability.
    pub fn require(&self, caller: &AccountAddress) -> Result<(), LedgerError> {
        match &self.owner {
            Some(owner) if owner == caller => Ok(()),
            _ => Err(LedgerError::NotAuthorized),
        }
    }

    /// Hand the capability to `new_owner`. Only the current holder may.
    pub fn transfer(
        &mut self,
        caller: &AccountAddress,
        new_owner: AccountAddress,
    ) -> Result<(), LedgerError> {
        self.require(caller)?;
        self.owner = Some(new_owner);
        Ok(())
    }

    /// Give the capability up permanently.
    pub fn renounce(&mut self, caller: &AccountAddress) -> Result<(), LedgerError> {
        self.require(caller)?;
        self.owner = None;
        Ok(())
    }
}
