//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Enable (startup.rs):
//!     Load config → Probe host → Build override set
//!     → Register listener (listener.rs) → Apply to loaded worlds
//!
//! World load (listener.rs):
//!     Host fires WorldLoadEvent → Apply override set to that world
//!
//! Disable (shutdown.rs):
//!     Unregister listener → Drop override set
//! ```
//!
//! # States
//! ```text
//! Uninitialized ──enable ok──▶ Ready ──disable──▶ Disabled
//!       │                        ▲                   │
//!       └──enable err──▶ Disabled └────enable ok─────┘
//! ```
//!
//! # Design Decisions
//! - Everything runs synchronously on the host's dispatch thread
//! - World loads may repeat for the same world; re-applying is harmless

pub mod listener;
pub mod shutdown;
pub mod startup;

pub use listener::OverrideListener;
pub use startup::{LootOverridePlugin, PluginStatus, StartupError};
