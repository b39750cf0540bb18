//! Namespaced resource identifiers.
//!
//! # Format
//! ```text
//! namespace:path      minecraft:chests/simple_dungeon
//! path                chest  →  minecraft:chest
//! ```
//!
//! # Design Decisions
//! - A bare path gets the `minecraft` namespace
//! - Both halves are lowercase ASCII; the path may contain `/`
//! - Serialized as the `namespace:path` string

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Namespace applied to identifiers written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Errors produced while parsing a [`ResourceKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("identifier is empty")]
    Empty,

    #[error("empty namespace in identifier '{0}'")]
    EmptyNamespace(String),

    #[error("empty path in identifier '{0}'")]
    EmptyPath(String),

    #[error("invalid character '{ch}' in namespace of '{input}'")]
    InvalidNamespace { input: String, ch: char },

    #[error("invalid character '{ch}' in path of '{input}'")]
    InvalidPath { input: String, ch: char },
}

/// Identifier naming one entry in a keyed registry, e.g. `minecraft:chest`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    namespace: String,
    path: String,
}

impl ResourceKey {
    /// Build a key from its two halves, validating both.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        let path = path.into();
        let display = format!("{}:{}", namespace, path);

        if namespace.is_empty() {
            return Err(KeyError::EmptyNamespace(display));
        }
        if path.is_empty() {
            return Err(KeyError::EmptyPath(display));
        }
        if let Some(ch) = namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(KeyError::InvalidNamespace { input: display, ch });
        }
        if let Some(ch) = path.chars().find(|c| !is_path_char(*c)) {
            return Err(KeyError::InvalidPath { input: display, ch });
        }

        Ok(Self { namespace, path })
    }

    /// Key in the default namespace.
    pub fn minecraft(path: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    /// Parse `namespace:path`, or a bare `path` in the default namespace.
    pub fn parse(input: &str) -> Result<Self, KeyError> {
        if input.is_empty() {
            return Err(KeyError::Empty);
        }
        match input.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::minecraft(input),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResourceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_path_gets_default_namespace() {
        let key = ResourceKey::parse("chest").unwrap();
        assert_eq!(key.namespace(), "minecraft");
        assert_eq!(key.path(), "chest");
        assert_eq!(key.to_string(), "minecraft:chest");
    }

    #[test]
    fn test_explicit_namespace_is_kept() {
        let key: ResourceKey = "myserver:chests/vault".parse().unwrap();
        assert_eq!(key.namespace(), "myserver");
        assert_eq!(key.path(), "chests/vault");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(ResourceKey::parse(""), Err(KeyError::Empty));
        assert!(matches!(ResourceKey::parse(":chest"), Err(KeyError::EmptyNamespace(_))));
        assert!(matches!(ResourceKey::parse("minecraft:"), Err(KeyError::EmptyPath(_))));
        assert!(matches!(
            ResourceKey::parse("Chest"),
            Err(KeyError::InvalidPath { ch: 'C', .. })
        ));
        assert!(matches!(
            ResourceKey::parse("my/ns:chest"),
            Err(KeyError::InvalidNamespace { ch: '/', .. })
        ));
    }

    #[test]
    fn test_serde_uses_string_form() {
        let key = ResourceKey::parse("entities/zombie").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"minecraft:entities/zombie\"");

        let back: ResourceKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);

        assert!(serde_json::from_str::<ResourceKey>("\"BAD KEY\"").is_err());
    }
}
