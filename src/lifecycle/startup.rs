//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Check the host exposes writable loot table registries
//! - Build the override set and register the world-load listener
//! - Apply the overrides to every world that is already loaded
//!
//! # Design Decisions
//! - Fail fast: a config or integration error leaves the plugin disabled
//!   with nothing registered and nothing written
//! - Per-entry and per-world errors are logged and never fatal
//! - The listener runs at `Highest` so these writes land last

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{self, ConfigError, CONFIG_FILE_NAME};
use crate::host::{EventPriority, Host, HostError, ListenerId};
use crate::lifecycle::listener::OverrideListener;
use crate::loot::DefinitionLoader;
use crate::observability::metrics;
use crate::overrides::{apply_to_worlds, LoadReport, OverrideSet};

/// Fatal errors raised while enabling the plugin.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot load {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("cannot access loot table registry: {0}")]
    Integration(#[source] HostError),

    #[error("plugin is already enabled")]
    AlreadyEnabled,
}

/// Where the plugin is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStatus {
    Uninitialized,
    /// Overrides loaded and the listener registered.
    Ready,
    /// A fatal error occurred, or the plugin was disabled.
    Disabled,
}

/// The loot table override plugin.
pub struct LootOverridePlugin {
    pub(crate) status: PluginStatus,
    pub(crate) overrides: Option<OverrideSet>,
    pub(crate) report: Option<LoadReport>,
    pub(crate) listener: Option<ListenerId>,
}

impl LootOverridePlugin {
    pub fn new() -> Self {
        Self {
            status: PluginStatus::Uninitialized,
            overrides: None,
            report: None,
            listener: None,
        }
    }

    pub fn status(&self) -> PluginStatus {
        self.status
    }

    /// The active override set, while `Ready`.
    pub fn overrides(&self) -> Option<&OverrideSet> {
        self.overrides.as_ref()
    }

    /// Outcome of the last successful load.
    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    /// Load everything and start overriding.
    pub fn enable(&mut self, host: &dyn Host) -> Result<&LoadReport, StartupError> {
        if self.status == PluginStatus::Ready {
            return Err(StartupError::AlreadyEnabled);
        }

        match self.try_enable(host) {
            Ok(()) => Ok(self.report.get_or_insert_with(LoadReport::default)),
            Err(e) => {
                tracing::error!(error = %e, "Disabling custom loot tables");
                self.status = PluginStatus::Disabled;
                Err(e)
            }
        }
    }

    fn try_enable(&mut self, host: &dyn Host) -> Result<(), StartupError> {
        let data_dir = host.data_dir().to_path_buf();
        let config = config::load_from_dir(&data_dir).map_err(|source| StartupError::Config {
            path: data_dir.join(CONFIG_FILE_NAME),
            source,
        })?;
        metrics::set_enabled(config.observability.metrics_enabled);

        host.probe_loot_registry().map_err(StartupError::Integration)?;

        tracing::info!(count = config.loot_tables.len(), "Found custom loot table config entries");
        for (identifier, file) in &config.loot_tables {
            tracing::info!("{} -> {}", identifier, file);
        }

        let loader = DefinitionLoader::new(&data_dir);
        let (overrides, report) = OverrideSet::build(&config, &loader);

        let listener = host.register_world_listener(
            EventPriority::Highest,
            Arc::new(OverrideListener::new(overrides.clone())),
        );

        let summary = apply_to_worlds(&overrides, &host.loaded_worlds());
        tracing::info!(
            overrides = overrides.len(),
            fallbacks = report.failures.len(),
            worlds = summary.applied.len(),
            failed_worlds = summary.failed.len(),
            "Custom loot tables enabled"
        );

        self.overrides = Some(overrides);
        self.report = Some(report);
        self.listener = Some(listener);
        self.status = PluginStatus::Ready;
        Ok(())
    }
}

impl Default for LootOverridePlugin {
    fn default() -> Self {
        Self::new()
    }
}
