//! Endpoint registry and request dispatch.
//!
//! # Responsibilities
//! - Collect endpoints at startup, merging method maps per route
//! - Reject duplicate (route, method) bindings
//! - Reject routes claimed by both a data route and island endpoints
//! - Freeze the registry into an axum `Router`
//! - Per request: method lookup, props binding, handler invocation
//!
//! # Design Decisions
//! - Path matching is left to axum; each island route gets one catch-all
//!   method router that does its own method lookup, so 404 and 405 are
//!   decided before any island logic runs
//! - `HEAD` falls back to the `GET` binding, as axum's `get` does
//! - Island and data routes are matched first; the base router only
//!   sees what they leave over, fallback included
//! - Registration is all-or-nothing per endpoint
//! - Immutable after `into_router` (route entries shared via `Arc`)
//! - No global state: every `IslandRouter` is independent

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, MethodRouter};
use axum::Router;
use tower::ServiceExt;

use crate::context::Props;
use crate::error::{IslandError, IslandResult};
use crate::observability::metrics;
use crate::routing::endpoint::{Binding, Endpoint};
use crate::routing::HttpMethod;

/// Method bindings registered for one route.
#[derive(Debug, Default)]
struct RouteEntry {
    route: String,
    methods: BTreeMap<HttpMethod, Binding>,
}

impl RouteEntry {
    /// Binding for `method`; `HEAD` is served by `GET` unless bound itself.
    fn lookup(&self, method: &Method) -> Option<&Binding> {
        let method = HttpMethod::from_http(method)?;
        self.methods.get(&method).or_else(|| match method {
            HttpMethod::Head => self.methods.get(&HttpMethod::Get),
            _ => None,
        })
    }

    fn allow_header(&self) -> String {
        let mut allowed: BTreeSet<HttpMethod> = self.methods.keys().copied().collect();
        if allowed.contains(&HttpMethod::Get) {
            allowed.insert(HttpMethod::Head);
        }
        allowed
            .iter()
            .map(HttpMethod::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    async fn dispatch(&self, mut request: Request<Body>) -> Response {
        let start_time = Instant::now();
        let method_str = request.method().to_string();

        let binding = match self.lookup(request.method()) {
            Some(b) => b,
            None => {
                tracing::warn!(route = %self.route, method = %method_str, "Method not allowed");
                metrics::record_request(&method_str, 405, &self.route, "none", start_time);
                let mut response = StatusCode::METHOD_NOT_ALLOWED.into_response();
                if let Ok(allow) = HeaderValue::from_str(&self.allow_header()) {
                    response.headers_mut().insert(header::ALLOW, allow);
                }
                return response;
            }
        };

        let island = binding.island().name().to_string();
        tracing::debug!(route = %self.route, method = %method_str, island = %island, "Dispatching to island");

        request
            .extensions_mut()
            .insert(Props::new(Arc::clone(binding.island())));

        let response = match binding.handler().clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        metrics::record_request(&method_str, response.status().as_u16(), &self.route, &island, start_time);
        response
    }
}

/// Builder and registry for island endpoints.
#[derive(Debug)]
pub struct IslandRouter {
    base: Router,
    data: Router,
    data_routes: BTreeSet<String>,
    routes: BTreeMap<String, RouteEntry>,
}

impl IslandRouter {
    /// An island router with no other routes; unmatched paths get 404.
    pub fn new() -> Self {
        Self::upgrade(Router::new().fallback(not_found))
    }

    /// Layer island endpoints over an existing router.
    ///
    /// `base` keeps its routes and its fallback, but only receives
    /// requests no island or data route matched. A path served by both
    /// `base` and an island goes to the island; register data routes with
    /// [`data_route`](Self::data_route) to have such overlaps rejected.
    pub fn upgrade(base: Router) -> Self {
        Self {
            base,
            data: Router::new(),
            data_routes: BTreeSet::new(),
            routes: BTreeMap::new(),
        }
    }

    /// Register a data-only route that carries no island.
    ///
    /// Fails with `RouteConflict` if `route` already has island endpoints
    /// or another data route.
    pub fn data_route(
        &mut self,
        route: impl Into<String>,
        handler: MethodRouter,
    ) -> IslandResult<&mut Self> {
        let route = route.into();
        validate_route(&route)?;
        if self.routes.contains_key(&route) || self.data_routes.contains(&route) {
            tracing::error!(route = %route, "Route already claimed");
            return Err(IslandError::RouteConflict { route });
        }

        tracing::debug!(route = %route, "Data route registered");
        self.data = std::mem::take(&mut self.data).route(&route, handler);
        self.data_routes.insert(route);
        Ok(self)
    }

    /// Register an endpoint; chainable with `?`.
    ///
    /// A route seen before gets its method map extended. Any (route,
    /// method) pair that is already bound, or repeated inside `endpoint`,
    /// fails the whole call and leaves the registry unchanged.
    pub fn add_endpoint(&mut self, endpoint: Endpoint) -> IslandResult<&mut Self> {
        let (route, handlers) = endpoint.into_parts();
        validate_route(&route)?;
        if self.data_routes.contains(&route) {
            tracing::error!(route = %route, "Route already served by a data route");
            return Err(IslandError::RouteConflict { route });
        }

        let existing = self.routes.get(&route);
        let mut seen = Vec::with_capacity(handlers.len());
        for (method, _) in &handlers {
            let bound = existing.is_some_and(|e| e.methods.contains_key(method));
            if bound || seen.contains(method) {
                tracing::error!(route = %route, method = %method, "Duplicate island binding");
                return Err(IslandError::RegistrationConflict {
                    route,
                    method: *method,
                });
            }
            seen.push(*method);
        }

        let entry = self.routes.entry(route.clone()).or_insert_with(|| RouteEntry {
            route: route.clone(),
            methods: BTreeMap::new(),
        });
        for (method, binding) in handlers {
            tracing::debug!(route = %route, method = %method, island = %binding.island().name(), "Endpoint registered");
            entry.methods.insert(method, binding);
        }
        Ok(self)
    }

    /// The binding for an exact route pattern and method.
    pub fn binding(&self, route: &str, method: HttpMethod) -> Option<&Binding> {
        self.routes.get(route)?.methods.get(&method)
    }

    /// Registered route patterns, sorted.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Number of (route, method) bindings.
    pub fn len(&self) -> usize {
        self.routes.values().map(|e| e.methods.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the registry into a servable router.
    pub fn into_router(self) -> Router {
        let mut router = self.data;
        for (route, entry) in self.routes {
            tracing::info!(route = %route, methods = %entry.allow_header(), "Island route mounted");
            let entry = Arc::new(entry);
            router = router.route(
                &route,
                any(move |request: Request<Body>| {
                    let entry = Arc::clone(&entry);
                    async move { entry.dispatch(request).await }
                }),
            );
        }
        router.fallback_service(self.base)
    }
}

impl Default for IslandRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_route(route: &str) -> IslandResult<()> {
    if route.is_empty() || !route.starts_with('/') {
        return Err(IslandError::InvalidRoute(route.to_string()));
    }
    Ok(())
}

async fn not_found(request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    tracing::warn!(path = %request.uri().path(), method = %method, "No route matched");
    metrics::record_request(&method, 404, "none", "none", start_time);
    (StatusCode::NOT_FOUND, "No matching route found").into_response()
}
