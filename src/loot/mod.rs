//! Loot table definitions.
//!
//! # Data Flow
//! ```text
//! <data_dir>/<file>.json
//!     → parser.rs (read, deserialize, check)
//!     → LootTable (types.rs), keyed by ResourceKey (key.rs)
//! ```

pub mod key;
pub mod parser;
pub mod types;

pub use key::{KeyError, ResourceKey};
pub use parser::{DefinitionError, DefinitionLoader};
pub use types::{EntryKind, LootCondition, LootEntry, LootFunction, LootPool, LootTable, NumberRange};
