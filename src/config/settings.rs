use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::errors::{MemVaultError, Result};

/// Immutable vault configuration, optionally loaded from `.memvault.toml`.
///
/// Every field has a default so a vault can be built without any config
/// file at all.  Tests override individual fields with struct-update
/// syntax: `VaultConfig { capacity: 3, ..VaultConfig::default() }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Human-readable vault name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Short ticker-style symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Epoch seconds the vault considers its genesis.
    #[serde(default = "default_genesis_timestamp")]
    pub genesis_timestamp: i64,

    /// Maximum content length in UTF-16 code units.
    #[serde(default = "default_max_content_len")]
    pub max_content_len: usize,

    /// Fee charged per entry, in wei.
    #[serde(default = "default_entry_fee")]
    pub entry_fee: Amount,

    /// Maximum number of entries the vault will ever hold.
    #[serde(default = "default_capacity")]
    pub capacity: u64,

    /// Minimum funding required to construct a vault, in wei.
    #[serde(default = "default_min_initial_funding")]
    pub min_initial_funding: Amount,

    /// Entry-count thresholds, strictly ascending.
    #[serde(default = "default_milestones")]
    pub milestones: [u64; 3],
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_name() -> String {
    "Base Onchain Memory Vault #8472".to_string()
}

fn default_symbol() -> String {
    "BOMV8472".to_string()
}

fn default_genesis_timestamp() -> i64 {
    1_738_281_600
}

fn default_max_content_len() -> usize {
    280
}

fn default_entry_fee() -> Amount {
    Amount::from_wei(420_000_000_000_000) // 0.00042 ether
}

fn default_capacity() -> u64 {
    10_000
}

fn default_min_initial_funding() -> Amount {
    Amount::from_wei(10_000_000_000_000_000) // 0.01 ether
}

fn default_milestones() -> [u64; 3] {
    [100, 1_000, 5_000]
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            genesis_timestamp: default_genesis_timestamp(),
            max_content_len: default_max_content_len(),
            entry_fee: default_entry_fee(),
            capacity: default_capacity(),
            min_initial_funding: default_min_initial_funding(),
            milestones: default_milestones(),
        }
    }
}

impl VaultConfig {
    /// Name of the config file we look for in a directory.
    pub const FILE_NAME: &'static str = ".memvault.toml";

    /// Load settings from `<dir>/.memvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    /// Load and validate an explicit config file.  A missing file is an error.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MemVaultError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;

        let config: VaultConfig = toml::from_str(&contents).map_err(|e| {
            MemVaultError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no vault could run with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(MemVaultError::ConfigError(
                "capacity must be at least 1".into(),
            ));
        }
        if self.max_content_len == 0 {
            return Err(MemVaultError::ConfigError(
                "max_content_len must be at least 1".into(),
            ));
        }
        if self.milestones[0] == 0 {
            return Err(MemVaultError::ConfigError(
                "milestone thresholds must be positive".into(),
            ));
        }
        if !self.milestones.windows(2).all(|w| w[0] < w[1]) {
            return Err(MemVaultError::ConfigError(format!(
                "milestone thresholds must be strictly ascending, got {:?}",
                self.milestones
            )));
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
