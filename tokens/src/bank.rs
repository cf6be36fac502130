//! In-memory token bank.

use std::collections::HashMap;

use granary_types::{AccountAddress, TokenId};

use crate::error::TokenError;
use crate::vault::{TokenIssuer, TokenVault};

/// In-memory implementation of both token collaborators.
///
/// Tracks per-account balances and one custody pool per token. All
/// bookkeeping is checked u128 arithmetic; debits fail with
/// [`TokenError::InsufficientBalance`], credits fail only on overflow.
#[derive(Clone, Debug, Default)]
pub struct MemTokenBank {
    balances: HashMap<(TokenId, AccountAddress), u128>,
    custody: HashMap<TokenId, u128>,
    issued: HashMap<TokenId, u128>,
}

impl MemTokenBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air (test/tooling seeding).
    pub fn credit(&mut self, token: &TokenId, account: &AccountAddress, amount: u128) {
        let balance = self
            .balances
            .entry((token.clone(), account.clone()))
            .or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Current balance of `account` in `token`.
    pub fn balance_of(&self, token: &TokenId, account: &AccountAddress) -> u128 {
        self.balances
            .get(&(token.clone(), account.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Amount of `token` currently held in ledger custody.
    pub fn custody_of(&self, token: &TokenId) -> u128 {
        self.custody.get(token).copied().unwrap_or(0)
    }

    /// Lifetime amount of `token` created through [`TokenIssuer::issue`].
    pub fn issued_of(&self, token: &TokenId) -> u128 {
        self.issued.get(token).copied().unwrap_or(0)
    }

    fn debit_account(
        &mut self,
        token: &TokenId,
        account: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        let key = (token.clone(), account.clone());
        let available = self.balances.get(&key).copied().unwrap_or(0);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                token: token.to_string(),
                needed: amount,
                available,
            });
        }
        self.balances.insert(key, available - amount);
        Ok(())
    }

    fn credit_account(
        &mut self,
        token: &TokenId,
        account: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        let balance = self
            .balances
            .entry((token.clone(), account.clone()))
            .or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }
}

impl TokenVault for MemTokenBank {
    fn transfer_in(
        &mut self,
        token: &TokenId,
        from: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.debit_account(token, from, amount)?;
        let pool = self.custody.entry(token.clone()).or_insert(0);
        *pool = pool.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    fn transfer_out(
        &mut self,
        token: &TokenId,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        let pool = self.custody.get(token).copied().unwrap_or(0);
        if pool < amount {
            return Err(TokenError::InsufficientBalance {
                token: token.to_string(),
                needed: amount,
                available: pool,
            });
        }
        self.custody.insert(token.clone(), pool - amount);
        self.credit_account(token, to, amount)
    }
}

impl TokenIssuer for MemTokenBank {
    fn issue(
        &mut self,
        token: &TokenId,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.credit_account(token, to, amount)?;
        let total = self.issued.entry(token.clone()).or_insert(0);
        *total = total.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }
}
