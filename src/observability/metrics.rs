//! Metrics collection.
//!
//! # Metrics
//! - `loot_overrides_configured` (gauge): entries in the override set
//! - `loot_override_load_failures_total` (counter): failed files, by reason
//! - `loot_overrides_applied_total` (counter): tables written, by world
//! - `loot_override_world_failures_total` (counter): worlds skipped, by world
//!
//! # Design Decisions
//! - Records through the `metrics` facade; the host installs a recorder
//!   (or none, in which case every call is a no-op)
//! - Recording can be switched off from config

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn recording on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_configured(count: usize) {
    if enabled() {
        metrics::gauge!("loot_overrides_configured").set(count as f64);
    }
}

pub fn record_load_failure(reason: &'static str) {
    if enabled() {
        metrics::counter!("loot_override_load_failures_total", "reason" => reason).increment(1);
    }
}

pub fn record_applied(world: &str, count: usize) {
    if enabled() {
        metrics::counter!("loot_overrides_applied_total", "world" => world.to_string())
            .increment(count as u64);
    }
}

pub fn record_world_failure(world: &str) {
    if enabled() {
        metrics::counter!("loot_override_world_failures_total", "world" => world.to_string())
            .increment(1);
    }
}
