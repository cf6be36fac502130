//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use granary_types::{AccountAddress, TokenId, MAX_ANNUAL_RATE_PCT, MAX_COOLDOWN_SECS};

use crate::error::LedgerError;

/// Configuration for a granary ledger.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Token identifier staked into custody.
    #[serde(default = "default_base_token")]
    pub base_token: TokenId,

    /// Token identifier minted for rewards.
    #[serde(default = "default_reward_token")]
    pub reward_token: TokenId,

    /// Initial simple-interest rate in whole percent per year.
    #[serde(default = "default_annual_rate_pct")]
    pub annual_rate_pct: u64,

    /// Initial claim cooldown in seconds.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Address holding the parameter-setting capability. `None` starts the
    /// ledger with the capability already renounced.
    #[serde(default)]
    pub owner: Option<AccountAddress>,

    /// Data directory for ledger storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_base_token() -> TokenId {
    TokenId::new("GRAIN")
}

fn default_reward_token() -> TokenId {
    TokenId::new("YIELD")
}

fn default_annual_rate_pct() -> u64 {
    12
}

fn default_cooldown_secs() -> u64 {
    7 * 86_400
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./granary_data")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, LedgerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LedgerError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("LedgerConfig is always serializable to TOML")
    }

    /// Check that the initial parameters are within ledger bounds.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.annual_rate_pct > MAX_ANNUAL_RATE_PCT {
            return Err(LedgerError::RateOutOfRange(self.annual_rate_pct));
        }
        if self.cooldown_secs > MAX_COOLDOWN_SECS {
            return Err(LedgerError::CooldownOutOfRange(self.cooldown_secs));
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_token: default_base_token(),
            reward_token: default_reward_token(),
            annual_rate_pct: default_annual_rate_pct(),
            cooldown_secs: default_cooldown_secs(),
            owner: None,
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LedgerConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = LedgerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.annual_rate_pct, config.annual_rate_pct);
        assert_eq!(parsed.cooldown_secs, config.cooldown_secs);
        assert_eq!(parsed.base_token, config.base_token);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.annual_rate_pct, 12);
        assert_eq!(config.cooldown_secs, 7 * 86_400);
        assert_eq!(config.base_token.as_str(), "GRAIN");
        assert_eq!(config.reward_token.as_str(), "YIELD");
        assert!(config.owner.is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            annual_rate_pct = 5
            owner = "gry_operator"
        "#;
        let config = LedgerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.annual_rate_pct, 5);
        assert_eq!(
            config.owner,
            Some(AccountAddress::new("gry_operator".to_string()))
        );
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn out_of_range_rate_fails_validation() {
        let config = LedgerConfig {
            annual_rate_pct: 101,
            ..LedgerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LedgerError::RateOutOfRange(101))
        ));
    }

    #[test]
    fn out_of_range_cooldown_fails_validation() {
        let config = LedgerConfig {
            cooldown_secs: 366 * 86_400,
            ..LedgerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LedgerError::CooldownOutOfRange(_))
        ));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = LedgerConfig::from_toml_file(Path::new("/nonexistent/granary.toml"));
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }
}
