//! Lab-wide configuration loaded from JSON.

use algolab_collections::{ConfigError, HashTable, HashTableConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LabConfig {
    pub hash_table: HashTableConfig,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            hash_table: HashTableConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl LabConfig {
    /// Parses and validates a configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.hash_table.validate()?;
        debug!(
            capacity = config.hash_table.capacity,
            strategy = %config.hash_table.strategy,
            "lab config loaded"
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// An empty hash table sized and probed as configured.
    pub fn hash_table(&self) -> Result<HashTable, ConfigError> {
        HashTable::with_config(&self.hash_table)
    }
}
