//! Render pipeline: the single place static props and payload combine.
//!
//! # Responsibilities
//! - Merge an island's props with a handler-produced payload
//! - Invoke the island's render function on the merged data
//! - Wrap the markup as a partial-page fragment response
//!
//! # Design Decisions
//! - Precedence is chosen by the handler, payload wins by default
//! - Rendering is never automatic; handlers call it when they want markup

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use crate::island::PropStore;

/// Header naming the island a fragment came from.
pub const X_ISLAND: &str = "x-island";

/// Which side wins when props and payload share a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precedence {
    #[default]
    PayloadWins,
    PropsWins,
}

/// Combine static props with request data.
pub fn merge(props: &PropStore, payload: Map<String, Value>, precedence: Precedence) -> Map<String, Value> {
    let mut merged = props.as_map().clone();
    for (key, value) in payload {
        match precedence {
            Precedence::PayloadWins => {
                merged.insert(key, value);
            }
            Precedence::PropsWins => {
                merged.entry(key).or_insert(value);
            }
        }
    }
    merged
}

/// Rendered markup for one island.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    island: String,
    body: Vec<u8>,
}

impl Fragment {
    pub fn new(island: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            island: island.into(),
            body,
        }
    }

    pub fn island(&self) -> &str {
        &self.island
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl IntoResponse for Fragment {
    fn into_response(self) -> Response {
        let mut response = (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            self.body,
        )
            .into_response();
        // Island names are free-form; skip the header if one is not a valid value.
        if let Ok(name) = HeaderValue::from_str(&self.island) {
            response.headers_mut().insert(X_ISLAND, name);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props() -> PropStore {
        let mut props = PropStore::new();
        props.insert("age", 28).unwrap();
        props.insert("name", "Jane Doe").unwrap();
        props
    }

    fn payload() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("age".into(), json!(29));
        map.insert("isBirthday".into(), json!(true));
        map
    }

    #[test]
    fn test_payload_wins() {
        let merged = merge(&props(), payload(), Precedence::PayloadWins);
        assert_eq!(
            Value::Object(merged),
            json!({"age": 29, "name": "Jane Doe", "isBirthday": true})
        );
    }

    #[test]
    fn test_props_win() {
        let merged = merge(&props(), payload(), Precedence::PropsWins);
        assert_eq!(
            Value::Object(merged),
            json!({"age": 28, "name": "Jane Doe", "isBirthday": true})
        );
    }

    #[test]
    fn test_merge_leaves_props_untouched() {
        let store = props();
        let _ = merge(&store, payload(), Precedence::PayloadWins);
        assert_eq!(store.get("age"), Some(&json!(28)));
        assert!(!store.contains_key("isBirthday"));
    }

    #[test]
    fn test_fragment_response() {
        let response = Fragment::new("navbar", b"<div></div>".to_vec()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(response.headers().get(X_ISLAND).unwrap(), "navbar");
    }
}
