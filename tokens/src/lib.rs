//! Token collaborators consumed by the staking ledger.
//!
//! The ledger never holds balances itself: custody of the staked token and
//! issuance of the reward token go through the traits defined here. Real
//! deployments back them with an actual token service; [`MemTokenBank`] is
//! the in-memory backend used by tests and tooling.

pub mod bank;
pub mod error;
pub mod vault;

pub use bank::MemTokenBank;
pub use error::TokenError;
pub use vault::{TokenIssuer, TokenVault};
