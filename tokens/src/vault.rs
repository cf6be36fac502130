//! Custody and issuance traits.
//!
//! Both traits report failure synchronously; the ledger treats any error as
//! fatal to the operation in progress and rolls its own state back.

use granary_types::{AccountAddress, TokenId};

use crate::error::TokenError;

/// Custody of fungible balances held on behalf of the ledger.
pub trait TokenVault {
    /// Move `amount` of `token` from `from` into ledger custody.
    fn transfer_in(
        &mut self,
        token: &TokenId,
        from: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError>;

    /// Release `amount` of `token` from ledger custody to `to`.
    fn transfer_out(
        &mut self,
        token: &TokenId,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError>;
}

/// Issuance of the reward token.
///
/// Rewards are minted at settlement, not drawn from a pooled balance.
pub trait TokenIssuer {
    fn issue(
        &mut self,
        token: &TokenId,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError>;
}
