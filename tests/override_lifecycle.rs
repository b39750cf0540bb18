//! End-to-end tests of enabling the plugin against an in-memory host.

use std::sync::Arc;

use custom_loot_tables::host::{
    EventPriority, Host, LootTableRegistry, MemoryHost, MemoryWorld, World, WorldLoadEvent,
    WorldLoadListener,
};
use custom_loot_tables::overrides::EntryStatus;
use custom_loot_tables::{LootOverridePlugin, LootTable, PluginStatus, ResourceKey};

mod common;

use common::{table, DataDir, CHEST_TABLE, ZOMBIE_TABLE};

fn key(s: &str) -> ResourceKey {
    ResourceKey::parse(s).unwrap()
}

#[test]
fn test_chest_override_reaches_every_world() {
    let data = DataDir::with_config(&[("chest", "chest.json")]);
    data.write("chest.json", CHEST_TABLE);

    let host = MemoryHost::new(data.path());
    let overworld = host.add_world(MemoryWorld::new("world"));
    let nether = host.add_world(MemoryWorld::new("world_nether"));

    let mut plugin = LootOverridePlugin::new();
    plugin.enable(&host).unwrap();
    assert_eq!(plugin.status(), PluginStatus::Ready);

    let expected = table(CHEST_TABLE);
    for world in [&overworld, &nether] {
        let registry = world.registry().unwrap();
        assert_eq!(*registry.get(&key("minecraft:chest")).unwrap(), expected);
    }

    // A world loaded after startup gets the override through the listener.
    let end = host.load_world(MemoryWorld::new("world_the_end"));
    assert_eq!(
        *end.registry().unwrap().get(&key("minecraft:chest")).unwrap(),
        expected
    );
}

#[test]
fn test_set_matches_file_contents() {
    let data = DataDir::with_config(&[
        ("chest", "chest.json"),
        ("entities/zombie", "zombie.json"),
        ("myserver:vault", "vault.json"),
    ]);
    data.write("chest.json", CHEST_TABLE)
        .write("zombie.json", ZOMBIE_TABLE)
        .write("vault.json", "{}");

    let host = MemoryHost::new(data.path());
    let mut plugin = LootOverridePlugin::new();
    let report = plugin.enable(&host).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.loaded, 3);

    let set = plugin.overrides().unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(*set.get(&key("chest")).unwrap().table, table(CHEST_TABLE));
    assert_eq!(*set.get(&key("entities/zombie")).unwrap().table, table(ZOMBIE_TABLE));

    let vault = set.get(&key("myserver:vault")).unwrap();
    assert_eq!(vault.status, EntryStatus::Loaded);
    assert_eq!(vault.identifier, "myserver:vault");
    assert!(vault.table.is_empty());
}

#[test]
fn test_other_tables_are_untouched() {
    let data = DataDir::with_config(&[("chest", "chest.json")]);
    data.write("chest.json", CHEST_TABLE);

    let host = MemoryHost::new(data.path());
    let world = host.add_world(MemoryWorld::new("world"));
    let registry = world.registry().unwrap().clone();
    let builtin_zombie = Arc::new(table(ZOMBIE_TABLE));
    registry.insert(key("entities/zombie"), builtin_zombie.clone());
    registry.insert(key("chest"), Arc::new(LootTable::empty()));

    let mut plugin = LootOverridePlugin::new();
    plugin.enable(&host).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(*registry.get(&key("chest")).unwrap(), table(CHEST_TABLE));
    assert!(Arc::ptr_eq(
        &registry.get(&key("entities/zombie")).unwrap(),
        &builtin_zombie
    ));
}

#[test]
fn test_reloading_a_world_is_idempotent() {
    let data = DataDir::with_config(&[("chest", "chest.json"), ("entities/zombie", "zombie.json")]);
    data.write("chest.json", CHEST_TABLE).write("zombie.json", ZOMBIE_TABLE);

    let host = MemoryHost::new(data.path());
    let world = host.add_world(MemoryWorld::new("world"));

    let mut plugin = LootOverridePlugin::new();
    plugin.enable(&host).unwrap();
    let after_enable = world.registry().unwrap().snapshot();

    // Fire the load event again for the same world object.
    host.dispatch_world_load(&WorldLoadEvent::new(world.clone()));
    host.dispatch_world_load(&WorldLoadEvent::new(world.clone()));

    assert_eq!(world.registry().unwrap().snapshot(), after_enable);
}

#[test]
fn test_reinitialized_world_gets_overrides_again() {
    let data = DataDir::with_config(&[("chest", "chest.json")]);
    data.write("chest.json", CHEST_TABLE);

    let host = MemoryHost::new(data.path());
    host.add_world(MemoryWorld::new("world"));

    let mut plugin = LootOverridePlugin::new();
    plugin.enable(&host).unwrap();

    // Same name, fresh registry: the host re-initialized the world.
    let fresh = host.load_world(MemoryWorld::new("world"));
    assert_eq!(host.loaded_worlds().len(), 1);
    assert_eq!(
        *fresh.registry().unwrap().get(&key("chest")).unwrap(),
        table(CHEST_TABLE)
    );
}

struct BuiltinWriter;

impl WorldLoadListener for BuiltinWriter {
    fn on_world_load(&self, event: &WorldLoadEvent) {
        if let Ok(registry) = event.world().loot_tables() {
            registry.insert(key("chest"), Arc::new(table(ZOMBIE_TABLE)));
        }
    }
}

#[test]
fn test_override_wins_over_lower_priority_listener() {
    let data = DataDir::with_config(&[("chest", "chest.json")]);
    data.write("chest.json", CHEST_TABLE);

    let host = MemoryHost::new(data.path());
    let mut plugin = LootOverridePlugin::new();
    plugin.enable(&host).unwrap();

    // Registered after the plugin, but at a lower priority.
    host.register_world_listener(EventPriority::Normal, Arc::new(BuiltinWriter));

    let world = host.load_world(MemoryWorld::new("world"));
    assert_eq!(
        *world.registry().unwrap().get(&key("chest")).unwrap(),
        table(CHEST_TABLE)
    );
}

#[test]
fn test_empty_mapping_enables_with_nothing_to_apply() {
    let data = DataDir::with_config(&[]);
    let host = MemoryHost::new(data.path());
    let world = host.add_world(MemoryWorld::new("world"));

    let mut plugin = LootOverridePlugin::new();
    let report = plugin.enable(&host).unwrap();

    assert_eq!(report.loaded, 0);
    assert_eq!(plugin.status(), PluginStatus::Ready);
    assert!(plugin.overrides().unwrap().is_empty());
    assert!(world.registry().unwrap().is_empty());
}
