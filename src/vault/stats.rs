//! Read-only snapshots returned by `Vault::stats` and `Vault::info`.

use serde::Serialize;

use crate::amount::Amount;
use crate::config::VaultConfig;

use super::milestone::Milestone;

/// Point-in-time vault statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultStats {
    pub count: u64,
    pub unique_creators: u64,
    pub total_value: Amount,
    pub remaining_capacity: u64,
    pub milestone1: bool,
    pub milestone2: bool,
    pub milestone3: bool,
    /// All three milestones with their thresholds and reached-at times.
    pub milestones: [Milestone; 3],
}

/// Static description of a vault, taken from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultInfo {
    pub name: String,
    pub symbol: String,
    pub genesis_timestamp: i64,
    pub entry_fee: Amount,
    pub capacity: u64,
    pub max_content_len: usize,
    pub milestones: [u64; 3],
}

impl VaultInfo {
    pub fn from_config(config: &VaultConfig) -> Self {
        Self {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            genesis_timestamp: config.genesis_timestamp,
            entry_fee: config.entry_fee,
            capacity: config.capacity,
            max_content_len: config.max_content_len,
            milestones: config.milestones,
        }
    }
}
