//! Ledger parameters — the two mutable knobs of the staking ledger.
//!
//! Both values are read by every accrual computation at the moment of
//! computation, never snapshotted at deposit time. Interest for unsettled
//! positions therefore always uses the current rate across a position's
//! full elapsed life; only a pending claim is a frozen snapshot.

use serde::{Deserialize, Serialize};

/// Number of seconds in a year (365 days).
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Upper bound on the annual interest rate, in whole percent.
pub const MAX_ANNUAL_RATE_PCT: u64 = 100;

/// Upper bound on the claim cooldown: 365 days.
pub const MAX_COOLDOWN_SECS: u64 = 365 * 86_400;

/// Mutable ledger parameters, changed only through the privileged setters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Simple-interest rate in whole percent per year, `0..=100`.
    pub annual_rate_pct: u64,

    /// Cooldown between claim application and settlement, in seconds,
    /// `0..=MAX_COOLDOWN_SECS`.
    pub cooldown_secs: u64,
}

impl LedgerParams {
    pub fn new(annual_rate_pct: u64, cooldown_secs: u64) -> Self {
        Self {
            annual_rate_pct,
            cooldown_secs,
        }
    }
}

/// Default is 12% per year with a 7-day cooldown.
impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            annual_rate_pct: 12,
            cooldown_secs: 7 * 86_400,
        }
    }
}
