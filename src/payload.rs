//! Per-request data produced by handlers.
//!
//! A payload is built inside one handler invocation and consumed by
//! [`Payload::marshal`] (or merged into a render via
//! [`crate::context::Props::render`]). Conversion failures in `set` are
//! held back until the payload is consumed, which keeps the build phase
//! infallible.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{IslandError, IslandResult};

/// Request-local key/value data, serialized once at the end of a handler.
#[derive(Debug, Default)]
pub struct Payload {
    entries: BTreeMap<String, Result<Value, String>>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; setting a key again replaces it.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        let value = serde_json::to_value(value).map_err(|e| e.to_string());
        self.entries.insert(key.into(), value);
        self
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

    /// Consume the payload into a JSON object.
    pub fn into_map(self) -> IslandResult<Map<String, Value>> {
        let mut map = Map::new();
        for (key, value) in self.entries {
            match value {
                Ok(value) => {
                    map.insert(key, value);
                }
                Err(reason) => return Err(IslandError::Serialization { key, reason }),
            }
        }
        Ok(map)
    }

    /// Serialize to JSON bytes with keys in sorted order.
    pub fn marshal(self) -> IslandResult<Vec<u8>> {
        let map = self.into_map()?;
        serde_json::to_vec(&map).map_err(|e| IslandError::Serialization {
            key: String::new(),
            reason: e.to_string(),
        })
    }
}
