//! Account address type with `gry_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A granary account address, always prefixed with `gry_`.
///
/// The ledger treats addresses as opaque identities; custody and issuance
/// backends map them onto whatever account scheme they use.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all granary account addresses.
    pub const PREFIX: &'static str = "gry_";

    /// Create a new account address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `gry_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with gry_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
