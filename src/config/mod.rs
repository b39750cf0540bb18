//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! <data_dir>/config.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PluginConfig (validated, immutable)
//!     → overrides::OverrideSet::build
//! ```
//!
//! # Design Decisions
//! - Config is read once at enable; there is no reload
//! - Any load or validation error is fatal for the plugin
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_dir, ConfigError, CONFIG_FILE_NAME};
pub use schema::{LogFormat, ObservabilityConfig, PluginConfig};
pub use validation::ValidationError;
