//! Simple-interest accrual math.
//!
//! Rewards are a pure function of position amount, elapsed seconds and the
//! annual rate in effect at evaluation time. There is no compounding and no
//! per-position rate snapshot.

use granary_types::{LedgerParams, Timestamp, SECONDS_PER_YEAR};

use crate::position::Position;

/// Reward accrued by a single position of `amount` at `rate_pct` over
/// `elapsed_secs`, `None` on overflow.
///
/// The full product is formed before dividing, and the division happens in
/// two floor steps: by 100 first, then by seconds-per-year. The truncation
/// order is part of the ledger's observable behavior and must not be
/// replaced by a combined divisor.
pub fn position_reward(amount: u128, rate_pct: u64, elapsed_secs: u64) -> Option<u128> {
    let gross = amount
        .checked_mul(rate_pct as u128)?
        .checked_mul(elapsed_secs as u128)?;
    Some(gross / 100 / SECONDS_PER_YEAR as u128)
}

/// Total reward across `positions` at `now` under the current `params`,
/// `None` on overflow.
///
/// Truncation loss is per position; the aggregate is not corrected.
pub fn total_reward(
    positions: &[Position],
    params: &LedgerParams,
    now: Timestamp,
) -> Option<u128> {
    let mut total = 0u128;
    for position in positions {
        let elapsed = position.created_at.elapsed_since(now);
        let reward = position_reward(position.amount, params.annual_rate_pct, elapsed)?;
        total = total.checked_add(reward)?;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_year_at_twelve_percent_is_exact() {
        // 1_000_000 * 12% over exactly one year: no truncation loss.
        assert_eq!(
            position_reward(1_000_000, 12, SECONDS_PER_YEAR),
            Some(120_000)
        );
    }

    #[test]
    fn half_year_floors() {
        // 1_000_001 * 10 * 15_768_000 = 157_680_157_680_000
        // / 100 = 1_576_801_576_800, / 31_536_000 = 50_000 (floor of 50_000.05)
        assert_eq!(
            position_reward(1_000_001, 10, SECONDS_PER_YEAR / 2),
            Some(50_000)
        );
    }

    #[test]
    fn zero_elapsed_is_zero() {
        assert_eq!(position_reward(1_000_000, 12, 0), Some(0));
    }

    #[test]
    fn zero_rate_is_zero() {
        assert_eq!(position_reward(1_000_000, 0, SECONDS_PER_YEAR), Some(0));
    }

    #[test]
    fn tiny_position_truncates_to_zero() {
        // 1 unit at 1% for 1 second: 1 / 100 / 31_536_000 floors to 0.
        assert_eq!(position_reward(1, 1, 1), Some(0));
    }

    #[test]
    fn overflow_returns_none() {
        assert_eq!(position_reward(u128::MAX, 2, 2), None);
    }

    #[test]
    fn total_reward_sums_per_position_truncations() {
        let now = Timestamp::new(SECONDS_PER_YEAR);
        let positions = vec![
            Position {
                amount: 1_000_000,
                created_at: Timestamp::EPOCH,
            },
            Position {
                amount: 500_000,
                created_at: Timestamp::new(SECONDS_PER_YEAR / 2),
            },
        ];
        let params = LedgerParams::new(12, 0);
        // 120_000 for the full year + 30_000 for the half year.
        assert_eq!(total_reward(&positions, &params, now), Some(150_000));
    }

    #[test]
    fn total_reward_of_empty_positions_is_zero() {
        let params = LedgerParams::default();
        assert_eq!(total_reward(&[], &params, Timestamp::new(1000)), Some(0));
    }

    #[test]
    fn position_created_in_future_accrues_nothing() {
        let positions = vec![Position {
            amount: 1_000_000,
            created_at: Timestamp::new(2_000),
        }];
        let params = LedgerParams::new(12, 0);
        assert_eq!(
            total_reward(&positions, &params, Timestamp::new(1_000)),
            Some(0)
        );
    }
}
