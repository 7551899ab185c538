//! Quoter configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

pub const CONFIG_ENV: &str = "QUOTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "quoter-config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for Solana cluster
    pub rpc_url: String,

    /// Polling interval in seconds
    pub poll_interval_secs: u64,

    /// Pool addresses to quote (base58)
    #[serde(default)]
    pub pools: Vec<String>,

    /// Pool owners whose pools are discovered on every tick (base58)
    #[serde(default)]
    pub owners: Vec<String>,

    /// Slippage applied to the best prices when logging builder limits
    #[serde(default)]
    pub slippage_bps: u16,
}

impl Config {
    /// Config path from `QUOTER_CONFIG`, falling back to the default file name
    pub fn path() -> String {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        shellexpand::tilde(&path).into_owned()
    }

    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        Self::parse(&config_str)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;

        // Surface bad addresses at startup rather than on the first tick
        config.pool_addresses()?;
        config.owner_addresses()?;

        Ok(config)
    }

    /// Create default configuration
    pub fn default_devnet() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            poll_interval_secs: 10,
            pools: Vec::new(),
            owners: Vec::new(),
            slippage_bps: 50,
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_devnet();
        let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;

        std::fs::write(path, toml_str).context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }

    pub fn pool_addresses(&self) -> Result<Vec<Pubkey>> {
        parse_pubkeys(&self.pools, "pool")
    }

    pub fn owner_addresses(&self) -> Result<Vec<Pubkey>> {
        parse_pubkeys(&self.owners, "owner")
    }
}

fn parse_pubkeys(values: &[String], what: &str) -> Result<Vec<Pubkey>> {
    values
        .iter()
        .map(|value| {
            Pubkey::from_str(value).context(format!("Invalid {} address: {}", what, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default_devnet();
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.poll_interval_secs, 10);
        assert!(config.pools.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let pool = Pubkey::new_unique();
        let toml_str = format!(
            r#"
            rpc_url = "http://127.0.0.1:8899"
            poll_interval_secs = 2
            pools = ["{}"]
            "#,
            pool
        );

        let config = Config::parse(&toml_str).unwrap();
        assert_eq!(config.poll_interval_secs, 2);
        assert_eq!(config.pool_addresses().unwrap(), vec![pool]);
        assert!(config.owner_addresses().unwrap().is_empty());
        assert_eq!(config.slippage_bps, 0);
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        let toml_str = r#"
            rpc_url = "http://127.0.0.1:8899"
            poll_interval_secs = 2
            owners = ["not-a-pubkey"]
        "#;

        assert!(Config::parse(toml_str).is_err());
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default_devnet();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&toml_str).unwrap(), config);
    }
}
