//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every identifier must parse as a resource key
//! - Every file name must stay inside the data directory
//! - The log level must be one `tracing` understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PluginConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::path::{Component, Path};

use crate::config::schema::PluginConfig;
use crate::loot::key::{KeyError, ResourceKey};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidIdentifier { identifier: String, error: KeyError },
    EmptyFileName { identifier: String },
    FileOutsideDataDir { identifier: String, file: String },
    InvalidLogLevel { level: String },
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidIdentifier { identifier, error } => {
                write!(f, "invalid identifier '{}': {}", identifier, error)
            }
            ValidationError::EmptyFileName { identifier } => {
                write!(f, "empty file name for '{}'", identifier)
            }
            ValidationError::FileOutsideDataDir { identifier, file } => {
                write!(f, "file '{}' for '{}' is outside the data directory", file, identifier)
            }
            ValidationError::InvalidLogLevel { level } => {
                write!(f, "invalid log level '{}', expected one of: {}", level, LOG_LEVELS.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check the whole config, collecting every problem found.
pub fn validate_config(config: &PluginConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (identifier, file) in &config.loot_tables {
        if let Err(error) = ResourceKey::parse(identifier) {
            errors.push(ValidationError::InvalidIdentifier {
                identifier: identifier.clone(),
                error,
            });
        }

        if file.trim().is_empty() {
            errors.push(ValidationError::EmptyFileName {
                identifier: identifier.clone(),
            });
        } else if !is_contained(Path::new(file)) {
            errors.push(ValidationError::FileOutsideDataDir {
                identifier: identifier.clone(),
                file: file.clone(),
            });
        }
    }

    let level = &config.observability.log_level;
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel {
            level: level.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Relative, with no `..`, so joining onto the data directory stays inside it.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
