//! Loading loot table definitions from disk.
//!
//! # Responsibilities
//! - Resolve a configured file name under the data directory
//! - Read the file as UTF-8 and deserialize the JSON table
//! - Reject tables the server would refuse (bad ranges, weights)
//!
//! # Design Decisions
//! - Every failure carries the resolved path for the operator
//! - Fallback to an empty table is the caller's decision, not ours

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::loot::types::{LootEntry, LootPool, LootTable, NumberRange};

/// Errors raised while loading one definition file.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File is missing, or the path is not a regular file.
    #[error("couldn't find loot table file {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("couldn't read loot table from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or JSON of the wrong shape.
    #[error("couldn't parse loot table from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON that describes an impossible table.
    #[error("invalid loot table in {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

impl DefinitionError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            DefinitionError::NotFound { .. } => "not_found",
            DefinitionError::Io { .. } => "io",
            DefinitionError::Parse { .. } => "parse",
            DefinitionError::Invalid { .. } => "invalid",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DefinitionError::NotFound { path }
            | DefinitionError::Io { path, .. }
            | DefinitionError::Parse { path, .. }
            | DefinitionError::Invalid { path, .. } => path,
        }
    }
}

/// Reads loot table files relative to a fixed base directory.
#[derive(Debug, Clone)]
pub struct DefinitionLoader {
    base_dir: PathBuf,
}

impl DefinitionLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Load and check the table stored in `file_name`.
    pub fn load(&self, file_name: &str) -> Result<LootTable, DefinitionError> {
        let path = self.base_dir.join(file_name);
        if !path.is_file() {
            return Err(DefinitionError::NotFound { path });
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => return Err(DefinitionError::Io { path, source }),
        };

        parse_table(&content).map_err(|e| match e {
            TableError::Json(source) => DefinitionError::Parse { path, source },
            TableError::Invalid(reason) => DefinitionError::Invalid { path, reason },
        })
    }
}

/// Failure of [`parse_table`], before a path is attached.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("malformed loot table: {0}")]
    Json(#[source] serde_json::Error),

    #[error("invalid loot table: {0}")]
    Invalid(String),
}

/// Deserialize a table from JSON text and check it.
pub fn parse_table(json: &str) -> Result<LootTable, TableError> {
    let table: LootTable = serde_json::from_str(json).map_err(TableError::Json)?;
    check_table(&table).map_err(TableError::Invalid)?;
    Ok(table)
}

fn check_table(table: &LootTable) -> Result<(), String> {
    for (i, pool) in table.pools.iter().enumerate() {
        check_pool(pool).map_err(|reason| format!("pool {}: {}", i, reason))?;
    }
    Ok(())
}

fn check_pool(pool: &LootPool) -> Result<(), String> {
    check_range("rolls", &pool.rolls)?;
    check_range("bonus_rolls", &pool.bonus_rolls)?;
    for (i, entry) in pool.entries.iter().enumerate() {
        check_entry(entry).map_err(|reason| format!("entry {}: {}", i, reason))?;
    }
    Ok(())
}

fn check_range(field: &str, range: &NumberRange) -> Result<(), String> {
    let (min, max) = (range.min(), range.max());
    if !min.is_finite() || !max.is_finite() {
        return Err(format!("{} must be finite", field));
    }
    if min < 0.0 {
        return Err(format!("{} must not be negative, got {}", field, min));
    }
    if min > max {
        return Err(format!("{} min {} is greater than max {}", field, min, max));
    }
    Ok(())
}

fn check_entry(entry: &LootEntry) -> Result<(), String> {
    if entry.weight < 1 {
        return Err(format!("weight must be at least 1, got {}", entry.weight));
    }
    Ok(())
}
