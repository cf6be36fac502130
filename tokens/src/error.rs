//! Token collaborator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("insufficient {token} balance: need {needed}, available {available}")]
    InsufficientBalance {
        token: String,
        needed: u128,
        available: u128,
    },

    #[error("arithmetic overflow in token bookkeeping")]
    Overflow,

    #[error("transfer rejected: {0}")]
    Rejected(String),
}
