//! Per-account staking records.

use granary_types::Timestamp;
use serde::{Deserialize, Serialize};

/// A single deposit of the base token.
///
/// Immutable once created; consumed all at once when the account applies
/// to claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Deposited amount in raw base-token units.
    pub amount: u128,

    /// When the deposit was made. Interest accrues from here.
    pub created_at: Timestamp,
}

/// A claim frozen at application time, awaiting its cooldown.
///
/// Principal and reward are snapshots; later rate changes never reprice
/// them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingClaim {
    pub principal: u128,
    pub reward: u128,

    /// Earliest time the claim may settle (inclusive).
    pub unlock_at: Timestamp,
}

/// Ledger state for a single account.
///
/// `positions` is non-empty only before a claim application; `pending` is
/// present only between application and settlement. A fresh stake while a
/// claim is pending starts a new, independent position sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub positions: Vec<Position>,
    pub pending: Option<PendingClaim>,
}

impl AccountState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of open (unapplied) position amounts, `None` on overflow.
    pub fn principal_checked(&self) -> Option<u128> {
        self.positions
            .iter()
            .try_fold(0u128, |acc, p| acc.checked_add(p.amount))
    }

    /// Sum of open position amounts, 0 on overflow.
    pub fn principal(&self) -> u128 {
        self.principal_checked().unwrap_or(0)
    }

    /// Principal frozen in the pending claim, 0 if none.
    pub fn pending_principal(&self) -> u128 {
        self.pending.as_ref().map(|c| c.principal).unwrap_or(0)
    }

    /// Reward frozen in the pending claim, 0 if none.
    pub fn pending_reward(&self) -> u128 {
        self.pending.as_ref().map(|c| c.reward).unwrap_or(0)
    }
}
