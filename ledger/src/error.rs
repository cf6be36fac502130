//! Ledger-specific errors.

use granary_tokens::TokenError;
use thiserror::Error;

use granary_types::Timestamp;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("a claim application is already pending")]
    ClaimAlreadyPending,

    #[error("no staking")]
    NoStake,

    #[error("no rewards")]
    NoReward,

    #[error("no pending claim to settle")]
    NoPendingClaim,

    #[error("claim too early: unlocks at {unlock_at}, now {now}")]
    ClaimLocked { unlock_at: Timestamp, now: Timestamp },

    #[error("annual rate {0}% exceeds the 100% bound")]
    RateOutOfRange(u64),

    #[error("cooldown {0}s exceeds the 365-day bound")]
    CooldownOutOfRange(u64),

    #[error("caller does not hold the ledger authority")]
    NotAuthorized,

    #[error("arithmetic overflow in ledger computation")]
    Overflow,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("storage error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}
