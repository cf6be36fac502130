use std::path::Path;
use std::sync::Arc;

use granary_store::{StakeStore, StoreError};
use granary_types::AccountAddress;
use heed::{types::Bytes, Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Default LMDB map size: 256 MiB, far beyond what the ledger needs.
pub const DEFAULT_MAP_SIZE: usize = 256 * 1024 * 1024;

pub struct LmdbStakeStore {
    env: Arc<Env>,
    accounts_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbStakeStore {
    /// Open (creating if needed) the store under `path`.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Io(e.to_string()))?;
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(2)
                .map_size(map_size)
                .open(path)
                .map_err(|e| LmdbError::Heed(e.to_string()))?
        };
        let mut wtxn = env.write_txn().map_err(|e| LmdbError::Heed(e.to_string()))?;
        let accounts_db = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("accounts"))
            .map_err(|e| LmdbError::Heed(e.to_string()))?;
        let meta_db = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("meta"))
            .map_err(|e| LmdbError::Heed(e.to_string()))?;
        wtxn.commit().map_err(|e| LmdbError::Heed(e.to_string()))?;
        Ok(Self {
            env: Arc::new(env),
            accounts_db,
            meta_db,
        })
    }
}

impl StakeStore for LmdbStakeStore {
    fn get_account_state(&self, address: &AccountAddress) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match self.accounts_db.get(&txn, address.as_str().as_bytes()) {
            Ok(Some(bytes)) => Ok(Some(bytes.to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn put_account_state(&self, address: &AccountAddress, state: &[u8]) -> Result<(), StoreError> {
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.accounts_db
            .put(&mut txn, address.as_str().as_bytes(), state)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit().map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn delete_account_state(&self, address: &AccountAddress) -> Result<(), StoreError> {
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.accounts_db
            .delete(&mut txn, address.as_str().as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit().map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn iter_account_states(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut results = Vec::new();
        let iter = self
            .accounts_db
            .iter(&txn)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        for item in iter {
            let (key, val) = item.map_err(|e| StoreError::Backend(e.to_string()))?;
            let addr_str = std::str::from_utf8(key)
                .map_err(|e| StoreError::Corruption(format!("non-utf8 account key: {e}")))?;
            results.push((AccountAddress::new(addr_str.to_string()), val.to_vec()));
        }
        Ok(results)
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match self.meta_db.get(&txn, key) {
            Ok(Some(bytes)) => Ok(Some(bytes.to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.meta_db
            .put(&mut txn, key, value)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit().map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
