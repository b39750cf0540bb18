//! Loot table overrides.
//!
//! # Data Flow
//! ```text
//! PluginConfig + DefinitionLoader
//!     → set.rs (OverrideSet::build, per-entry fallback)
//!     → OverrideSet (immutable, shared via Arc)
//!     → applier.rs (write into each world's registry)
//! ```

pub mod applier;
pub mod set;

pub use applier::{apply_and_log, apply_to_world, apply_to_worlds, ApplyError, ApplySummary};
pub use set::{EntryError, EntryFailure, EntryStatus, LoadReport, OverrideEntry, OverrideSet};
