//! Islands: named render units with static props.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Island::new(name, render)
//!     → add_prop / add_props (mutable, single owner)
//!     → Endpoint::handler(method, h, island) moves it into Arc<Island>
//!     → frozen: shared read-only by every request bound to it
//!
//! Request:
//!     Props view (Arc<Island>) → handler → render(merged props + payload)
//! ```
//!
//! # Design Decisions
//! - Freezing is enforced by ownership: once wrapped in `Arc` there is no
//!   mutable path back to the prop store
//! - The render function is shared, so identity survives registration

pub mod props;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{IslandError, IslandResult};

pub use props::PropStore;

/// Render function turning merged island data into markup bytes.
pub type RenderFn = Arc<dyn Fn(&Map<String, Value>) -> Vec<u8> + Send + Sync>;

/// A named, independently renderable fragment.
#[derive(Clone)]
pub struct Island {
    name: String,
    render: RenderFn,
    props: PropStore,
}

impl Island {
    /// Create an island with no props.
    pub fn new<F>(name: impl Into<String>, render: F) -> IslandResult<Self>
    where
        F: Fn(&Map<String, Value>) -> Vec<u8> + Send + Sync + 'static,
    {
        Self::with_render_fn(name, Arc::new(render))
    }

    /// Create an island around an already shared render function.
    pub fn with_render_fn(name: impl Into<String>, render: RenderFn) -> IslandResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IslandError::InvalidName(name));
        }
        Ok(Self {
            name,
            render,
            props: PropStore::new(),
        })
    }

    /// Add one prop, overwriting any previous value under `key`.
    ///
    /// Only callable while the island is still exclusively owned, i.e.
    /// before it is attached to an endpoint.
    pub fn add_prop<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> IslandResult<&mut Self> {
        self.props.insert(key, value)?;
        Ok(self)
    }

    /// Bulk version of [`Island::add_prop`].
    pub fn add_props<I, K, V>(&mut self, props: I) -> IslandResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        for (key, value) in props {
            self.props.insert(key, value)?;
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &PropStore {
        &self.props
    }

    pub fn render_fn(&self) -> &RenderFn {
        &self.render
    }

    /// Invoke the render function on fully merged data.
    pub fn render(&self, data: &Map<String, Value>) -> Vec<u8> {
        (self.render)(data)
    }
}

impl fmt::Debug for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Island")
            .field("name", &self.name)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo(data: &Map<String, Value>) -> Vec<u8> {
        serde_json::to_vec(data).unwrap_or_default()
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(Island::new("", echo), Err(IslandError::InvalidName(_))));
        assert!(matches!(Island::new("  ", echo), Err(IslandError::InvalidName(_))));
    }

    #[test]
    fn test_add_props_matches_repeated_add_prop() {
        let mut bulk = Island::new("navbar", echo).unwrap();
        bulk.add_props([("ID", json!("helloID")), ("trigger", json!("load"))])
            .unwrap();

        let mut single = Island::new("navbar", echo).unwrap();
        single
            .add_prop("ID", "helloID")
            .unwrap()
            .add_prop("trigger", "load")
            .unwrap();

        assert_eq!(bulk.props(), single.props());
    }

    #[test]
    fn test_render_uses_render_fn() {
        let island = Island::new("greeting", |data: &Map<String, Value>| {
            format!("<p>{}</p>", data.len()).into_bytes()
        })
        .unwrap();

        let mut data = Map::new();
        data.insert("a".into(), json!(1));
        assert_eq!(island.render(&data), b"<p>1</p>".to_vec());
    }

    #[test]
    fn test_clone_shares_render_fn() {
        let island = Island::new("greeting", echo).unwrap();
        let copy = island.clone();
        assert!(Arc::ptr_eq(island.render_fn(), copy.render_fn()));
    }
}
