//! In-memory store backend for tests and tooling.

use std::collections::HashMap;
use std::sync::Mutex;

use granary_types::AccountAddress;

use crate::stake::StakeStore;
use crate::StoreError;

#[derive(Default)]
struct Inner {
    accounts: HashMap<AccountAddress, Vec<u8>>,
    meta: HashMap<Vec<u8>, Vec<u8>>,
}

/// A [`StakeStore`] kept entirely in memory.
#[derive(Default)]
pub struct MemStakeStore {
    inner: Mutex<Inner>,
}

impl MemStakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("poisoned store lock".to_string()))
    }
}

impl StakeStore for MemStakeStore {
    fn get_account_state(&self, address: &AccountAddress) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.accounts.get(address).cloned())
    }

    fn put_account_state(&self, address: &AccountAddress, state: &[u8]) -> Result<(), StoreError> {
        self.lock()?.accounts.insert(address.clone(), state.to_vec());
        Ok(())
    }

    fn delete_account_state(&self, address: &AccountAddress) -> Result<(), StoreError> {
        self.lock()?.accounts.remove(address);
        Ok(())
    }

    fn iter_account_states(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .lock()?
            .accounts
            .iter()
            .map(|(addr, bytes)| (addr.clone(), bytes.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.meta.get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.lock()?.meta.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
