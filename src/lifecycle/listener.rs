//! World-load listener that re-applies the override set.

use crate::host::{WorldLoadEvent, WorldLoadListener};
use crate::overrides::{apply_and_log, OverrideSet};

/// Applies its override set to every world the host reports as loaded.
pub struct OverrideListener {
    overrides: OverrideSet,
}

impl OverrideListener {
    pub fn new(overrides: OverrideSet) -> Self {
        Self { overrides }
    }
}

impl WorldLoadListener for OverrideListener {
    fn on_world_load(&self, event: &WorldLoadEvent) {
        // Failures are logged inside; nothing to propagate to the host.
        let _ = apply_and_log(&self.overrides, event.world());
    }
}
