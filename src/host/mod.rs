//! Host server extension point.
//!
//! # Responsibilities
//! - Describe what the plugin needs from the game server: its data
//!   directory, its loaded worlds, each world's loot table registry,
//!   and world-load notifications
//! - Keep registry storage and event dispatch on the host's side
//!
//! # Design Decisions
//! - Public traits instead of reaching into server internals
//! - Registry writes are infallible point writes; the only per-world
//!   failure is not being able to reach the registry at all
//! - Listeners are called synchronously on the host's dispatch thread,
//!   in ascending priority order

pub mod memory;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::loot::{LootTable, ResourceKey};

pub use memory::{MemoryHost, MemoryRegistry, MemoryWorld};

/// Errors surfaced by the host integration.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// The host offers no way to override loot tables. Fatal at enable.
    #[error("loot table registry is not accessible: {0}")]
    RegistryUnavailable(String),

    /// One world's registry handle can't be reached.
    #[error("world '{world}' has no accessible loot table registry: {reason}")]
    WorldRegistryUnavailable { world: String, reason: String },
}

/// A world's keyed store of loot tables.
pub trait LootTableRegistry: Send + Sync {
    /// Insert `table` under `key`, replacing any existing entry.
    fn insert(&self, key: ResourceKey, table: Arc<LootTable>);

    fn get(&self, key: &ResourceKey) -> Option<Arc<LootTable>>;
}

/// A loaded world.
pub trait World: Send + Sync {
    fn name(&self) -> &str;

    /// The registry this world resolves loot tables from.
    fn loot_tables(&self) -> Result<Arc<dyn LootTableRegistry>, HostError>;
}

/// Fired once a world has finished loading or re-initializing.
#[derive(Clone)]
pub struct WorldLoadEvent {
    world: Arc<dyn World>,
}

impl WorldLoadEvent {
    pub fn new(world: Arc<dyn World>) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &dyn World {
        self.world.as_ref()
    }
}

impl std::fmt::Debug for WorldLoadEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldLoadEvent")
            .field("world", &self.world.name())
            .finish()
    }
}

/// Callback for world-load notifications.
pub trait WorldLoadListener: Send + Sync {
    fn on_world_load(&self, event: &WorldLoadEvent);
}

/// Listener ordering. Lower priorities run first, so `Highest` has the
/// final say over anything it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventPriority {
    Lowest,
    Low,
    Normal,
    High,
    Highest,
}

/// Handle returned by [`Host::register_world_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// The game server as seen by the plugin.
pub trait Host: Send + Sync {
    /// Directory holding `config.toml` and the override files.
    fn data_dir(&self) -> &Path;

    /// Worlds that are already loaded.
    fn loaded_worlds(&self) -> Vec<Arc<dyn World>>;

    /// Confirm loot table registries can be written at all.
    fn probe_loot_registry(&self) -> Result<(), HostError>;

    fn register_world_listener(
        &self,
        priority: EventPriority,
        listener: Arc<dyn WorldLoadListener>,
    ) -> ListenerId;

    /// Returns false if `id` was not registered.
    fn unregister_world_listener(&self, id: ListenerId) -> bool;
}
