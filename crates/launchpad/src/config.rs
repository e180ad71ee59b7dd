use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::str::FromStr;

use crate::constants::{
    lamports_to_sol, CONFIRMATION_POLL_INTERVAL_MS, DEPLOYMENT_FEE_LAMPORTS, FEE_RECIPIENT,
    SAFETY_MARGIN_LAMPORTS, TRANSACTION_TIMEOUT_SECS,
};
use crate::error::{LaunchError, LaunchResult};

/// Launchpad configuration loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    pub network: NetworkConfig,
    pub fees: FeeConfig,
    pub logging: LoggingConfig,
}

/// Cluster connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Cluster name: devnet, testnet, mainnet-beta or localnet
    pub cluster: String,

    /// Custom RPC endpoint, overrides the cluster URL when set
    pub custom_rpc_url: Option<String>,

    /// Commitment used for queries and confirmation
    pub commitment: String,

    /// Confirmation timeout in seconds
    pub transaction_timeout_secs: u64,

    /// Delay between signature status polls in milliseconds
    pub poll_interval_ms: u64,
}

/// Deployment fee settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Fee charged per launch in lamports
    pub deployment_fee_lamports: u64,

    /// Fee recipient wallet
    #[serde(with = "pubkey_serde")]
    pub fee_recipient: Pubkey,

    /// Collect the fee before creating the mint
    pub enforce_fees: bool,

    /// Extra balance required on top of the fee in lamports
    pub safety_margin_lamports: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            cluster: "devnet".to_string(),
            custom_rpc_url: None,
            commitment: "confirmed".to_string(),
            transaction_timeout_secs: TRANSACTION_TIMEOUT_SECS,
            poll_interval_ms: CONFIRMATION_POLL_INTERVAL_MS,
        }
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            deployment_fee_lamports: DEPLOYMENT_FEE_LAMPORTS,
            fee_recipient: FEE_RECIPIENT,
            enforce_fees: true,
            safety_margin_lamports: SAFETY_MARGIN_LAMPORTS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LaunchpadConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> LaunchResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LaunchError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: LaunchpadConfig = toml::from_str(&content).map_err(|e| {
            LaunchError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Load from file when it exists, otherwise defaults, then apply environment overrides
    pub fn load_or_default(path: impl AsRef<Path>) -> LaunchResult<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> LaunchResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| LaunchError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            LaunchError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Apply `SOLANA_NETWORK`, `CUSTOM_RPC_URL` and `FEE_RECIPIENT`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> LaunchResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(cluster) = lookup("SOLANA_NETWORK").filter(|v| !v.is_empty()) {
            self.network.cluster = cluster;
        }

        if let Some(url) = lookup("CUSTOM_RPC_URL").filter(|v| !v.is_empty()) {
            self.network.custom_rpc_url = Some(url);
        }

        if let Some(recipient) = lookup("FEE_RECIPIENT").filter(|v| !v.is_empty()) {
            self.fees.fee_recipient = Pubkey::from_str(&recipient).map_err(|e| {
                LaunchError::Config(format!("Invalid FEE_RECIPIENT {}: {}", recipient, e))
            })?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> LaunchResult<()> {
        self.network.validate()?;
        self.fees.validate()?;
        Ok(())
    }
}

impl NetworkConfig {
    fn validate(&self) -> LaunchResult<()> {
        if self.custom_rpc_url.is_none() {
            cluster_url(&self.cluster)?;
        }

        CommitmentConfig::from_str(&self.commitment).map_err(|_| {
            LaunchError::Config(format!("Unknown commitment level: {}", self.commitment))
        })?;

        if self.transaction_timeout_secs == 0 {
            return Err(LaunchError::Config(
                "transaction_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(LaunchError::Config(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// RPC endpoint, preferring the custom URL
    pub fn rpc_url(&self) -> LaunchResult<String> {
        match &self.custom_rpc_url {
            Some(url) => Ok(url.clone()),
            None => cluster_url(&self.cluster).map(str::to_string),
        }
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        CommitmentConfig::from_str(&self.commitment).unwrap_or_else(|_| CommitmentConfig::confirmed())
    }

    pub fn transaction_timeout(&self) -> Duration {
        Duration::from_secs(self.transaction_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl FeeConfig {
    fn validate(&self) -> LaunchResult<()> {
        if self.enforce_fees && self.deployment_fee_lamports == 0 {
            return Err(LaunchError::Config(
                "deployment_fee_lamports must be greater than 0 when fees are enforced".to_string(),
            ));
        }

        if self.enforce_fees && self.fee_recipient == Pubkey::default() {
            return Err(LaunchError::Config("fee_recipient is not set".to_string()));
        }

        Ok(())
    }

    pub fn deployment_fee_sol(&self) -> f64 {
        lamports_to_sol(self.deployment_fee_lamports)
    }
}

/// Public RPC endpoint for a named cluster
pub fn cluster_url(cluster: &str) -> LaunchResult<&'static str> {
    match cluster {
        "devnet" => Ok("https://api.devnet.solana.com"),
        "testnet" => Ok("https://api.testnet.solana.com"),
        "mainnet" | "mainnet-beta" => Ok("https://api.mainnet-beta.solana.com"),
        "localnet" | "localhost" => Ok("http://localhost:8899"),
        other => Err(LaunchError::Config(format!("Unknown cluster: {}", other))),
    }
}

// Custom serde module for Pubkey
mod pubkey_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&pubkey.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LaunchpadConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network.rpc_url().unwrap(), "https://api.devnet.solana.com");
        assert_eq!(config.network.transaction_timeout(), Duration::from_secs(60));
        assert_eq!(config.fees.deployment_fee_sol(), 0.5);
        assert_eq!(config.fees.fee_recipient, FEE_RECIPIENT);
    }

    #[test]
    fn test_config_validation() {
        let mut config = LaunchpadConfig::default();
        config.network.cluster = "moonnet".to_string();
        assert!(config.validate().is_err());

        // A custom URL makes the cluster name irrelevant
        config.network.custom_rpc_url = Some("http://127.0.0.1:8899".to_string());
        assert!(config.validate().is_ok());

        config.network.commitment = "eventually".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = LaunchpadConfig::default();
        let recipient = Pubkey::new_unique();
        config
            .apply_env_overrides(|key| match key {
                "SOLANA_NETWORK" => Some("testnet".to_string()),
                "FEE_RECIPIENT" => Some(recipient.to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.network.cluster, "testnet");
        assert_eq!(config.network.custom_rpc_url, None);
        assert_eq!(config.fees.fee_recipient, recipient);

        let bad = config.apply_env_overrides(|key| match key {
            "FEE_RECIPIENT" => Some("not-a-key".to_string()),
            _ => None,
        });
        assert!(bad.is_err());
    }
}
