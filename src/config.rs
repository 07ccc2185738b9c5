//! Client configuration.
//!
//! Defaults target the Soroban testnet. A TOML file may override any field,
//! and `PAPEX_*` environment variables override the file.
//!
//! ```toml
//! rpc_url = "https://soroban-testnet.stellar.org"
//! network_passphrase = "Test SDF Network ; September 2015"
//! registry_contract_id = "CBCONDDFUWZ2Q3226JDQ5ZXPD7V6S2NCQ76A47K7IPVTB6ZAKIHI5D2M"
//! decimals = 7
//! poll_interval_ms = 2000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::amount::{DEFAULT_DECIMALS, MAX_DECIMALS};
use crate::types::identity::validate_account;
use crate::types::NetworkContext;

/// Testnet RPC endpoint
pub const TESTNET_RPC_URL: &str = "https://soroban-testnet.stellar.org";

/// Testnet network passphrase
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Well-known account used to simulate view calls when no wallet is connected.
/// It does not need to exist on-chain.
pub const READ_ONLY_IDENTITY: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Minimum inclusion fee per operation, in stroops
pub const BASE_FEE: u32 = 100;

/// Runtime configuration for the contract client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Network passphrase
    pub network_passphrase: String,

    /// Identity used for simulations when no wallet is connected
    pub read_only_identity: String,

    /// Decimal places of every scaled amount
    pub decimals: u32,

    /// Registry contract id (empty = unset)
    pub registry_contract_id: String,

    /// Marketplace contract id (empty = unset)
    pub marketplace_contract_id: String,

    /// Inclusion fee per transaction, in stroops
    pub base_fee: u32,

    /// Validity window of a built transaction, in seconds
    pub tx_timeout_secs: u64,

    /// Interval between confirmation polls, in milliseconds
    pub poll_interval_ms: u64,

    /// Give up polling after this many seconds; `None` polls indefinitely
    pub poll_deadline_secs: Option<u64>,

    /// Timeout of a single HTTP request, in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: TESTNET_RPC_URL.to_string(),
            network_passphrase: TESTNET_PASSPHRASE.to_string(),
            read_only_identity: READ_ONLY_IDENTITY.to_string(),
            decimals: DEFAULT_DECIMALS,
            registry_contract_id: String::new(),
            marketplace_contract_id: String::new(),
            base_fee: BASE_FEE,
            tx_timeout_secs: 30,
            poll_interval_ms: 2_000,
            poll_deadline_secs: None,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Configuration(format!("invalid config: {}", e)))
    }

    /// Load a TOML file, apply environment overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Configuration(format!("cannot read {}: {}", path.display(), e)))?;
        let mut config = Self::from_toml_str(&source)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `PAPEX_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`, keyed by `PAPEX_*` variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PAPEX_RPC_URL") {
            self.rpc_url = v;
        }
        if let Some(v) = lookup("PAPEX_NETWORK_PASSPHRASE") {
            self.network_passphrase = v;
        }
        if let Some(v) = lookup("PAPEX_READ_ONLY_IDENTITY") {
            self.read_only_identity = v;
        }
        if let Some(v) = lookup("PAPEX_REGISTRY_CONTRACT") {
            self.registry_contract_id = v;
        }
        if let Some(v) = lookup("PAPEX_MARKETPLACE_CONTRACT") {
            self.marketplace_contract_id = v;
        }
        if let Some(v) = lookup("PAPEX_DECIMALS") {
            self.decimals = parse_number("PAPEX_DECIMALS", &v)?;
        }
        if let Some(v) = lookup("PAPEX_POLL_INTERVAL_MS") {
            self.poll_interval_ms = parse_number("PAPEX_POLL_INTERVAL_MS", &v)?;
        }
        if let Some(v) = lookup("PAPEX_POLL_DEADLINE_SECS") {
            self.poll_deadline_secs = if v.trim().is_empty() {
                None
            } else {
                Some(parse_number("PAPEX_POLL_DEADLINE_SECS", &v)?)
            };
        }
        Ok(())
    }

    /// Reject configurations the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(Error::Configuration("rpc_url is empty".into()));
        }
        if self.network_passphrase.trim().is_empty() {
            return Err(Error::Configuration("network_passphrase is empty".into()));
        }
        validate_account(&self.read_only_identity)
            .map_err(|e| Error::Configuration(format!("read_only_identity: {}", e)))?;
        if self.decimals > MAX_DECIMALS {
            return Err(Error::Configuration(format!(
                "decimals must be at most {}, got {}",
                MAX_DECIMALS, self.decimals
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Configuration("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }

    /// Network context for the configured passphrase
    pub fn network(&self) -> NetworkContext {
        NetworkContext::new(self.network_passphrase.clone())
    }

    /// Interval between confirmation polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Confirmation deadline, if any
    pub fn poll_deadline(&self) -> Option<Duration> {
        self.poll_deadline_secs.map(Duration::from_secs)
    }

    /// Per-request HTTP timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Fail with [`Error::Configuration`] unless `contract_id` is set.
///
/// Empty ids and `<...>` placeholders count as unset.
pub fn require_contract_id(contract_id: &str) -> Result<&str> {
    let trimmed = contract_id.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') || trimmed.ends_with('>') {
        return Err(Error::Configuration(format!(
            "contract id {:?} is not configured",
            contract_id
        )));
    }
    Ok(trimmed)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Configuration(format!("{} must be a number, got {:?}", key, value)))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        config.validate().unwrap();
        assert_eq!(config.decimals, 7);
        assert_eq!(config.poll_deadline(), None);
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_read_only_identity_is_well_formed() {
        assert_eq!(READ_ONLY_IDENTITY.len(), 56);
        validate_account(READ_ONLY_IDENTITY).unwrap();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            decimals = 6
            marketplace_contract_id = "CABADC5GSAYX6KG2ESKV4REU743ZYIQCSTMYCKU4ATZOJ6JTLBRCOFZ6"
            poll_deadline_secs = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.decimals, 6);
        assert_eq!(config.rpc_url, TESTNET_RPC_URL);
        assert_eq!(config.poll_deadline(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ClientConfig::from_toml_str("decimals = \"seven\"").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PAPEX_RPC_URL", "http://localhost:8000"),
            ("PAPEX_DECIMALS", "9"),
            ("PAPEX_POLL_DEADLINE_SECS", "45"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8000");
        assert_eq!(config.decimals, 9);
        assert_eq!(config.poll_deadline_secs, Some(45));
    }

    #[test]
    fn test_bad_override_is_configuration_error() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_overrides(|k| (k == "PAPEX_DECIMALS").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = ClientConfig { decimals: 39, ..ClientConfig::default() };
        assert!(config.validate().is_err());

        config = ClientConfig { poll_interval_ms: 0, ..ClientConfig::default() };
        assert!(config.validate().is_err());

        config = ClientConfig { read_only_identity: "nobody".into(), ..ClientConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_require_contract_id() {
        assert!(require_contract_id("").is_err());
        assert!(require_contract_id("<CBCONDDFUWZ2Q3226JDQ5ZXPD7V6S2NCQ76A47K7IPVTB6ZAKIHI5D2M>").is_err());
        assert_eq!(
            require_contract_id(" CBCONDDFUWZ2Q3226JDQ5ZXPD7V6S2NCQ76A47K7IPVTB6ZAKIHI5D2M ").unwrap(),
            "CBCONDDFUWZ2Q3226JDQ5ZXPD7V6S2NCQ76A47K7IPVTB6ZAKIHI5D2M"
        );
    }
}
