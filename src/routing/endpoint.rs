//! Endpoint declarations: a route plus its method bindings.

use std::fmt;
use std::sync::Arc;

use axum::handler::Handler;
use axum::routing::{any, MethodRouter};

use crate::island::Island;
use crate::routing::HttpMethod;

/// A handler paired with the island it serves.
#[derive(Clone)]
pub struct Binding {
    handler: MethodRouter,
    island: Arc<Island>,
}

impl Binding {
    /// The frozen island shared with every request on this binding.
    pub fn island(&self) -> &Arc<Island> {
        &self.island
    }

    pub(crate) fn handler(&self) -> &MethodRouter {
        &self.handler
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("island", &self.island.name())
            .finish_non_exhaustive()
    }
}

/// A route bound to method → (handler, island) pairs.
///
/// Duplicate methods are kept as declared and rejected when the endpoint
/// is registered, so a typo never silently replaces a handler.
#[derive(Debug)]
pub struct Endpoint {
    route: String,
    handlers: Vec<(HttpMethod, Binding)>,
}

impl Endpoint {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            handlers: Vec::new(),
        }
    }

    /// Bind `method` to `handler`, taking ownership of `island`.
    ///
    /// `handler` is any axum handler; it can extract
    /// [`Props`](crate::context::Props) to read the island's props.
    /// A `GET` binding also answers `HEAD` unless `HEAD` is bound
    /// separately.
    pub fn handler<H, T>(mut self, method: HttpMethod, handler: H, island: Island) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.handlers.push((
            method,
            Binding {
                handler: any(handler),
                island: Arc::new(island),
            },
        ));
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.handlers.iter().map(|(method, _)| *method)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<(HttpMethod, Binding)>) {
        (self.route, self.handlers)
    }
}
