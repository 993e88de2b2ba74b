//! Static island configuration.
//!
//! # Design Decisions
//! - Values are stored as `serde_json::Value` so any `Serialize` type can be
//!   attached and later narrowed back with a checked conversion
//! - Keys are kept in sorted order, so iteration and rendering input are
//!   deterministic regardless of insertion order
//! - No removal: a store only grows until its island is attached

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{IslandError, IslandResult};

/// Key/value props attached to an island.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropStore {
    entries: Map<String, Value>,
}

impl PropStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite one entry.
    pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> IslandResult<()> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| IslandError::Serialization {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// The underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_insert_overwrites() {
        let mut props = PropStore::new();
        props.insert("trigger", "load").unwrap();
        props.insert("trigger", "click").unwrap();

        assert_eq!(props.len(), 1);
        assert_eq!(props.get("trigger"), Some(&json!("click")));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut props = PropStore::new();
        props.insert("url", "/greeting/hi").unwrap();
        props.insert("ID", "helloID").unwrap();
        props.insert("classes", "hello greeting").unwrap();

        let keys: Vec<_> = props.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["ID", "classes", "url"]);
    }

    #[test]
    fn test_unrepresentable_value_rejected() {
        let mut bad = HashMap::new();
        bad.insert((1u8, 2u8), "tuple keys");

        let mut props = PropStore::new();
        let err = props.insert("grid", bad).unwrap_err();
        assert!(matches!(err, IslandError::Serialization { ref key, .. } if key == "grid"));
        assert!(props.is_empty());
    }
}
