//! Disabling the plugin.

use crate::host::Host;
use crate::lifecycle::startup::{LootOverridePlugin, PluginStatus};

impl LootOverridePlugin {
    /// Stop overriding: unregister the listener and drop the override set.
    ///
    /// Tables already written into world registries stay there until the
    /// host reloads those worlds.
    pub fn disable(&mut self, host: &dyn Host) {
        if let Some(id) = self.listener.take() {
            if !host.unregister_world_listener(id) {
                tracing::warn!(listener = id.0, "World listener was already unregistered");
            }
        }
        self.overrides = None;
        self.status = PluginStatus::Disabled;
        tracing::info!("Custom loot tables disabled");
    }
}
