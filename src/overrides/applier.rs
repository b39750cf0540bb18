//! Writing the override set into world registries.
//!
//! # Responsibilities
//! - Insert every override into one world's loot table registry
//! - Apply to many worlds, isolating failures per world
//!
//! # Design Decisions
//! - Unconditional overwrite; applying twice equals applying once
//! - A world whose registry can't be reached is logged and skipped
//! - Non-overridden registry entries are never touched

use std::sync::Arc;

use thiserror::Error;

use crate::host::{HostError, World};
use crate::observability::metrics;
use crate::overrides::set::OverrideSet;

/// Failure to apply overrides to one world.
#[derive(Debug, Clone, Error)]
#[error("couldn't replace default loot tables in world '{world}': {source}")]
pub struct ApplyError {
    pub world: String,
    #[source]
    pub source: HostError,
}

/// Apply every override to `world`. Returns the number of tables written.
pub fn apply_to_world(set: &OverrideSet, world: &dyn World) -> Result<usize, ApplyError> {
    let registry = world.loot_tables().map_err(|source| ApplyError {
        world: world.name().to_string(),
        source,
    })?;

    for entry in set.iter() {
        registry.insert(entry.key.clone(), entry.table.clone());
    }

    Ok(set.len())
}

/// Like [`apply_to_world`], logging the outcome instead of returning it.
pub fn apply_and_log(set: &OverrideSet, world: &dyn World) -> Result<usize, ApplyError> {
    match apply_to_world(set, world) {
        Ok(count) => {
            tracing::info!(world = %world.name(), count, "Applied custom loot tables");
            metrics::record_applied(world.name(), count);
            Ok(count)
        }
        Err(e) => {
            tracing::error!(world = %world.name(), error = %e.source, "Couldn't replace default loot tables");
            metrics::record_world_failure(world.name());
            Err(e)
        }
    }
}

/// Result of applying to several worlds.
#[derive(Debug, Default)]
pub struct ApplySummary {
    /// Names of worlds that received the overrides.
    pub applied: Vec<String>,
    pub failed: Vec<ApplyError>,
}

/// Apply to each world in turn; one failing world doesn't stop the rest.
pub fn apply_to_worlds(set: &OverrideSet, worlds: &[Arc<dyn World>]) -> ApplySummary {
    let mut summary = ApplySummary::default();
    for world in worlds {
        match apply_and_log(set, world.as_ref()) {
            Ok(_) => summary.applied.push(world.name().to_string()),
            Err(e) => summary.failed.push(e),
        }
    }
    summary
}
