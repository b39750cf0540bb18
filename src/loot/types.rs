//! Loot table definition schema.
//!
//! Mirrors the JSON dialect the server reads for its own loot tables:
//!
//! ```json
//! {
//!   "pools": [
//!     {
//!       "rolls": { "min": 2, "max": 4 },
//!       "entries": [
//!         { "type": "item", "name": "minecraft:diamond", "weight": 1 },
//!         { "type": "empty", "weight": 9 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Functions and conditions are kept as their name plus raw parameters;
//! the server interprets them, this crate only carries them through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::loot::key::ResourceKey;

/// A complete loot table.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LootTable {
    /// Context type (`minecraft:chest`, `minecraft:entity`, ...). Older
    /// table files omit it.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub pools: Vec<LootPool>,
}

impl LootTable {
    /// The table that drops nothing. Used in place of any override that
    /// failed to load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// One pool: roll `rolls` times, each roll picking one weighted entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LootPool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub rolls: NumberRange,

    #[serde(default)]
    pub bonus_rolls: NumberRange,

    #[serde(default)]
    pub entries: Vec<LootEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<LootCondition>,
}

/// A fixed number or an inclusive uniform range.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NumberRange {
    Constant(f32),
    Uniform { min: f32, max: f32 },
}

impl NumberRange {
    pub fn min(&self) -> f32 {
        match self {
            NumberRange::Constant(v) => *v,
            NumberRange::Uniform { min, .. } => *min,
        }
    }

    pub fn max(&self) -> f32 {
        match self {
            NumberRange::Constant(v) => *v,
            NumberRange::Uniform { max, .. } => *max,
        }
    }
}

impl Default for NumberRange {
    fn default() -> Self {
        NumberRange::Constant(0.0)
    }
}

/// A weighted pool entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LootEntry {
    #[serde(flatten)]
    pub kind: EntryKind,

    #[serde(default = "default_weight")]
    pub weight: i32,

    #[serde(default)]
    pub quality: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<LootCondition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<LootFunction>,
}

fn default_weight() -> i32 {
    1
}

/// What an entry produces when selected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// A single item stack.
    Item { name: ResourceKey },
    /// Rolls another table by reference.
    LootTable { name: ResourceKey },
    /// Drops nothing; only takes up weight.
    Empty,
}

/// An item modifier applied to the produced stack.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LootFunction {
    pub function: ResourceKey,

    #[serde(flatten)]
    pub params: Map<String, Value>,
}

/// A predicate gating a pool, entry or function.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LootCondition {
    pub condition: ResourceKey,

    #[serde(flatten)]
    pub params: Map<String, Value>,
}
