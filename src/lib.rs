//! Custom loot tables for a game server.
//!
//! Replaces the server's built-in loot tables for configured identifiers
//! with definitions read from the plugin data directory, at enable and
//! again each time a world loads.

pub mod config;
pub mod host;
pub mod lifecycle;
pub mod loot;
pub mod observability;
pub mod overrides;

pub use config::PluginConfig;
pub use host::{Host, LootTableRegistry, World};
pub use lifecycle::{LootOverridePlugin, PluginStatus};
pub use loot::{LootTable, ResourceKey};
pub use overrides::OverrideSet;
