//! The granary staking ledger.
//!
//! Accounts deposit the base token, accrue time-proportional simple
//! interest denominated in the reward token, and withdraw principal plus
//! reward through a two-phase claim: `apply_claim` freezes the account's
//! open positions into a single snapshot, `claim` settles it once the
//! cooldown has passed.
//!
//! This crate handles:
//! - Deposit recording (positions) and the aggregate outstanding total
//! - Interest computation from elapsed time and the current annual rate
//! - The apply/claim state machine with frozen claim snapshots
//! - Event emission and durable persistence through the store traits

pub mod accrual;
pub mod authority;
pub mod config;
pub mod error;
pub mod event;
pub mod ledger;
pub mod position;

pub use authority::Authority;
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use event::{EventBus, LedgerEvent};
pub use ledger::{RewardView, StakingLedger};
pub use position::{AccountState, PendingClaim, Position};
