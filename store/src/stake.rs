use granary_types::AccountAddress;

use crate::StoreError;

/// Store trait for persisting staking-ledger state to durable storage.
///
/// Uses opaque `Vec<u8>` so the store doesn't depend on the ledger crate
/// (which would create a circular dependency). The ledger serializes and
/// deserializes its own types.
pub trait StakeStore {
    fn get_account_state(&self, address: &AccountAddress) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_account_state(&self, address: &AccountAddress, state: &[u8]) -> Result<(), StoreError>;
    fn delete_account_state(&self, address: &AccountAddress) -> Result<(), StoreError>;
    fn iter_account_states(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
