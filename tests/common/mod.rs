//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use custom_loot_tables::loot::parser::parse_table;
use custom_loot_tables::LootTable;

/// A chest table with two pools.
pub const CHEST_TABLE: &str = r#"{
    "pools": [
        {
            "name": "valuables",
            "rolls": { "min": 1, "max": 3 },
            "entries": [
                { "type": "item", "name": "minecraft:diamond", "weight": 1 },
                { "type": "item", "name": "minecraft:emerald", "weight": 4 },
                { "type": "empty", "weight": 10 }
            ]
        },
        {
            "rolls": 2,
            "entries": [
                {
                    "type": "item",
                    "name": "minecraft:bread",
                    "functions": [{ "function": "set_count", "count": { "min": 1, "max": 4 } }]
                }
            ]
        }
    ]
}"#;

/// A zombie drop table.
pub const ZOMBIE_TABLE: &str = r#"{
    "pools": [{ "rolls": 1, "entries": [{ "type": "item", "name": "minecraft:rotten_flesh" }] }]
}"#;

pub fn table(json: &str) -> LootTable {
    match parse_table(json) {
        Ok(table) => table,
        Err(e) => panic!("fixture table does not parse: {:?}", e),
    }
}

/// Temporary plugin data directory.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    /// A data directory whose `config.toml` maps the given entries.
    pub fn with_config(entries: &[(&str, &str)]) -> Self {
        let data = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        let mut config = String::from("[loot-tables]\n");
        for (identifier, file) in entries {
            config.push_str(&format!("\"{}\" = \"{}\"\n", identifier, file));
        }
        data.write("config.toml", &config);
        data
    }

    /// An empty data directory (no config at all).
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn write(&self, name: &str, contents: &str) -> &Self {
        fs::write(self.dir.path().join(name), contents).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// One captured log event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if the message or any field value contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.contains(needle) || self.fields.iter().any(|(_, v)| v.contains(needle))
    }
}

/// Layer recording every event it sees.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == Level::ERROR)
            .collect()
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push((field.name().to_string(), format!("{:?}", value)));
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Run `f` with a capturing subscriber installed on this thread.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture)
}
