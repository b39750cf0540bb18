//! The immutable override set.
//!
//! # Responsibilities
//! - Turn the configured identifier → file mapping into loaded tables
//! - Keep one entry per configured identifier, even when loading failed
//! - Report every failed entry with identifier and file name
//!
//! # Design Decisions
//! - A failed entry holds the empty table; it is still applied, so a
//!   world never keeps the built-in table the operator meant to replace
//! - One bad file never stops the others from loading
//! - Built once, then shared read-only via `Arc`

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::PluginConfig;
use crate::loot::{DefinitionError, DefinitionLoader, KeyError, LootTable, ResourceKey};
use crate::observability::metrics;

/// How an entry's table was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Loaded,
    /// Loading failed; the entry holds the empty table.
    Fallback { reason: String },
}

/// One configured override.
#[derive(Debug, Clone)]
pub struct OverrideEntry {
    /// Identifier exactly as written in the config.
    pub identifier: String,
    pub key: ResourceKey,
    pub file_name: String,
    pub table: Arc<LootTable>,
    pub status: EntryStatus,
}

impl OverrideEntry {
    pub fn is_fallback(&self) -> bool {
        matches!(self.status, EntryStatus::Fallback { .. })
    }
}

/// Why a configured override couldn't be used.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The identifier is not a resource key; the entry has no slot in the set.
    #[error("invalid identifier: {0}")]
    Identifier(#[from] KeyError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl EntryError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            EntryError::Identifier(_) => "identifier",
            EntryError::Definition(e) => e.reason(),
        }
    }
}

/// A configured override that couldn't be used.
#[derive(Debug)]
pub struct EntryFailure {
    pub identifier: String,
    pub file_name: String,
    pub error: EntryError,
}

/// Outcome of [`OverrideSet::build`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub failures: Vec<EntryFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Mapping from identifier to replacement table, fixed after build.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    entries: Arc<BTreeMap<ResourceKey, OverrideEntry>>,
}

impl OverrideSet {
    /// Load every table named in `config` through `loader`.
    ///
    /// An identifier that doesn't parse has no key to override, so it is
    /// reported as a failure without an entry. Every other identifier
    /// gets an entry, and `loaded` plus the file failures always equals
    /// the size of the set.
    pub fn build(config: &PluginConfig, loader: &DefinitionLoader) -> (Self, LoadReport) {
        let mut entries = BTreeMap::new();
        let mut report = LoadReport::default();

        for (identifier, file_name) in &config.loot_tables {
            let key = match ResourceKey::parse(identifier) {
                Ok(key) => key,
                Err(e) => {
                    let error = EntryError::from(e);
                    tracing::error!(
                        identifier = %identifier,
                        file = %file_name,
                        error = %error,
                        "Skipping invalid loot table identifier"
                    );
                    metrics::record_load_failure(error.reason());
                    report.failures.push(EntryFailure {
                        identifier: identifier.clone(),
                        file_name: file_name.clone(),
                        error,
                    });
                    continue;
                }
            };

            let (table, status) = match loader.load(file_name) {
                Ok(table) => {
                    report.loaded += 1;
                    (table, EntryStatus::Loaded)
                }
                Err(error) => {
                    tracing::error!(
                        identifier = %identifier,
                        file = %file_name,
                        error = %error,
                        "Couldn't load custom loot table, using empty table"
                    );
                    metrics::record_load_failure(error.reason());
                    let status = EntryStatus::Fallback {
                        reason: error.to_string(),
                    };
                    report.failures.push(EntryFailure {
                        identifier: identifier.clone(),
                        file_name: file_name.clone(),
                        error: error.into(),
                    });
                    (LootTable::empty(), status)
                }
            };

            let entry = OverrideEntry {
                identifier: identifier.clone(),
                key: key.clone(),
                file_name: file_name.clone(),
                table: Arc::new(table),
                status,
            };

            if let Some(previous) = entries.insert(key.clone(), entry) {
                tracing::warn!(
                    key = %key,
                    replaced = %previous.identifier,
                    by = %identifier,
                    "Two identifiers resolve to the same loot table, keeping the later one"
                );
                if previous.is_fallback() {
                    report.failures.retain(|f| f.identifier != previous.identifier);
                } else {
                    report.loaded -= 1;
                }
            }
        }

        metrics::record_configured(entries.len());
        (
            Self {
                entries: Arc::new(entries),
            },
            report,
        )
    }

    /// Build a set from already loaded tables.
    pub fn from_tables(tables: impl IntoIterator<Item = (ResourceKey, LootTable)>) -> Self {
        let entries = tables
            .into_iter()
            .map(|(key, table)| {
                let entry = OverrideEntry {
                    identifier: key.to_string(),
                    key: key.clone(),
                    file_name: String::new(),
                    table: Arc::new(table),
                    status: EntryStatus::Loaded,
                };
                (key, entry)
            })
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&OverrideEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = &OverrideEntry> {
        self.entries.values()
    }
}
