//! LMDB storage backend for the granary ledger.
//!
//! Implements the storage traits from `granary-store` using the `heed` LMDB
//! bindings. The whole ledger lives in one environment with one database for
//! account records and one for metadata.

pub mod error;
pub mod stake;

pub use error::LmdbError;
pub use stake::LmdbStakeStore;
