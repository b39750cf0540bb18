//! In-process host implementation.
//!
//! Backs the plugin with plain in-memory worlds. Used by embedders that
//! keep their own world list and by the test suite.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;

use crate::host::{
    EventPriority, Host, HostError, ListenerId, LootTableRegistry, World, WorldLoadEvent,
    WorldLoadListener,
};
use crate::loot::{LootTable, ResourceKey};

/// A thread-safe loot table registry.
#[derive(Default)]
pub struct MemoryRegistry {
    tables: DashMap<ResourceKey, Arc<LootTable>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Copy of the current contents, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<ResourceKey, Arc<LootTable>> {
        self.tables
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}

impl LootTableRegistry for MemoryRegistry {
    fn insert(&self, key: ResourceKey, table: Arc<LootTable>) {
        self.tables.insert(key, table);
    }

    fn get(&self, key: &ResourceKey) -> Option<Arc<LootTable>> {
        self.tables.get(key).map(|r| r.value().clone())
    }
}

/// A world owning its own registry.
pub struct MemoryWorld {
    name: String,
    registry: Option<Arc<MemoryRegistry>>,
}

impl MemoryWorld {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: Some(Arc::new(MemoryRegistry::new())),
        }
    }

    /// A world whose registry handle can't be reached.
    pub fn detached(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: None,
        }
    }

    pub fn registry(&self) -> Option<&Arc<MemoryRegistry>> {
        self.registry.as_ref()
    }
}

impl World for MemoryWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn loot_tables(&self) -> Result<Arc<dyn LootTableRegistry>, HostError> {
        match &self.registry {
            Some(registry) => Ok(registry.clone() as Arc<dyn LootTableRegistry>),
            None => Err(HostError::WorldRegistryUnavailable {
                world: self.name.clone(),
                reason: "registry handle detached".to_string(),
            }),
        }
    }
}

struct RegisteredListener {
    id: ListenerId,
    priority: EventPriority,
    listener: Arc<dyn WorldLoadListener>,
}

/// Host holding worlds and listeners in memory.
pub struct MemoryHost {
    data_dir: PathBuf,
    registry_available: bool,
    worlds: RwLock<Vec<Arc<MemoryWorld>>>,
    listeners: RwLock<Vec<RegisteredListener>>,
    next_listener_id: AtomicU64,
}

impl MemoryHost {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            registry_available: true,
            worlds: RwLock::new(Vec::new()),
            listeners: RwLock::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// A host whose registries can't be overridden.
    pub fn without_loot_registry(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry_available: false,
            ..Self::new(data_dir)
        }
    }

    /// Add a world without firing a load event, as if it was loaded
    /// before the plugin.
    pub fn add_world(&self, world: MemoryWorld) -> Arc<MemoryWorld> {
        let world = Arc::new(world);
        let mut worlds = self.worlds.write().unwrap_or_else(PoisonError::into_inner);
        worlds.retain(|w| w.name != world.name);
        worlds.push(world.clone());
        world
    }

    /// Add (or replace) a world and notify listeners on this thread.
    pub fn load_world(&self, world: MemoryWorld) -> Arc<MemoryWorld> {
        let world = self.add_world(world);
        self.dispatch_world_load(&WorldLoadEvent::new(world.clone()));
        world
    }

    pub fn world(&self, name: &str) -> Option<Arc<MemoryWorld>> {
        self.worlds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|w| w.name == name)
            .cloned()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Call every listener in ascending priority, registration order
    /// within a priority.
    pub fn dispatch_world_load(&self, event: &WorldLoadEvent) {
        let mut ordered: Vec<(EventPriority, ListenerId, Arc<dyn WorldLoadListener>)> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|l| (l.priority, l.id, l.listener.clone()))
            .collect();
        ordered.sort_by_key(|(priority, id, _)| (*priority, *id));

        for (_, _, listener) in ordered {
            listener.on_world_load(event);
        }
    }
}

impl Host for MemoryHost {
    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn loaded_worlds(&self) -> Vec<Arc<dyn World>> {
        self.worlds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|w| w.clone() as Arc<dyn World>)
            .collect()
    }

    fn probe_loot_registry(&self) -> Result<(), HostError> {
        if self.registry_available {
            Ok(())
        } else {
            Err(HostError::RegistryUnavailable(
                "host does not expose loot table registries".to_string(),
            ))
        }
    }

    fn register_world_listener(
        &self,
        priority: EventPriority,
        listener: Arc<dyn WorldLoadListener>,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RegisteredListener {
                id,
                priority,
                listener,
            });
        id
    }

    fn unregister_world_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }
}
