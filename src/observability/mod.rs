//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, overrides, lifecycle produce:
//!     → tracing events (structured fields: world, identifier, file, error)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → the host's subscriber and recorder, or logging.rs when standalone
//! ```

pub mod logging;
pub mod metrics;
