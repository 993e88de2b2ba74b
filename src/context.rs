//! Request-scoped props view.
//!
//! # Responsibilities
//! - Expose the resolved island's static props to the bound handler
//! - Narrow stored values to caller types without panicking
//! - Hand off to the render pipeline with a handler-built payload
//!
//! # Design Decisions
//! - The view is inserted into request extensions by the island router,
//!   right after method+path resolve; nothing else creates it
//! - Payload data is never visible here; it only meets props in `render`
//! - Cloning the view clones an `Arc`, never the prop store

use std::any::type_name;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{Extensions, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{IslandError, IslandResult};
use crate::island::Island;
use crate::observability::metrics;
use crate::payload::Payload;
use crate::render::{merge, Fragment, Precedence};

/// Read-only view of the island bound to the current request.
#[derive(Debug, Clone)]
pub struct Props {
    island: Arc<Island>,
}

impl Props {
    pub(crate) fn new(island: Arc<Island>) -> Self {
        Self { island }
    }

    /// Look up the view in a request's extensions.
    pub fn from_extensions(extensions: &Extensions) -> IslandResult<Self> {
        extensions.get::<Props>().cloned().ok_or(IslandError::NoBinding)
    }

    /// The island this request resolved to.
    pub fn island(&self) -> &Arc<Island> {
        &self.island
    }

    pub fn island_name(&self) -> &str {
        self.island.name()
    }

    /// Every prop of the bound island, exactly as registered.
    pub fn as_map(&self) -> &Map<String, Value> {
        self.island.props().as_map()
    }

    pub fn len(&self) -> usize {
        self.island.props().len()
    }

    pub fn is_empty(&self) -> bool {
        self.island.props().is_empty()
    }

    /// The stored value, unconverted.
    pub fn get_raw(&self, key: &str) -> IslandResult<&Value> {
        self.island
            .props()
            .get(key)
            .ok_or_else(|| IslandError::MissingProp { key: key.to_string() })
    }

    /// The stored value converted to `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> IslandResult<T> {
        let raw = self.get_raw(key)?;
        T::deserialize(raw).map_err(|e| IslandError::TypeMismatch {
            key: key.to_string(),
            expected: type_name::<T>(),
            reason: e.to_string(),
        })
    }

    /// Render the island with `payload` layered over its props.
    pub fn render(&self, payload: Payload) -> IslandResult<Fragment> {
        self.render_with(payload, Precedence::default())
    }

    pub fn render_with(&self, payload: Payload, precedence: Precedence) -> IslandResult<Fragment> {
        let merged = merge(self.island.props(), payload.into_map()?, precedence);
        let body = self.island.render(&merged);
        metrics::record_render(self.island.name());
        tracing::debug!(island = %self.island.name(), bytes = body.len(), "Island rendered");
        Ok(Fragment::new(self.island.name(), body))
    }
}

/// Props of the island bound to `request`.
pub fn props_for_request<B>(request: &Request<B>) -> IslandResult<Props> {
    Props::from_extensions(request.extensions())
}

impl<S> FromRequestParts<S> for Props
where
    S: Send + Sync,
{
    type Rejection = IslandError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Props::from_extensions(&parts.extensions)
    }
}
