//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from `config.toml`:
//!
//! ```toml
//! [loot-tables]
//! chest = "chest.json"
//! "chests/simple_dungeon" = "dungeon.json"
//! "myserver:vault" = "vault.json"
//!
//! [observability]
//! log_level = "info"
//! log_format = "pretty"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the plugin.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PluginConfig {
    /// Identifier → override file name, relative to the data directory.
    ///
    /// Required: a config without this table is rejected, so a typo in
    /// the section name can't silently disable every override.
    #[serde(rename = "loot-tables")]
    pub loot_tables: BTreeMap<String, String>,

    /// Observability settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for the log subscriber.
    pub log_format: LogFormat,

    /// Record counters through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
