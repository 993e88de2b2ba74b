//! Server-side islands rendering layer.
//!
//! Routes and methods bind to named islands: render units carrying static
//! props. Handlers read props through a request-scoped [`Props`] view,
//! compute a per-request [`Payload`], and decide whether to marshal it or
//! render the island with it.
//!
//! ```text
//! Endpoint { route, method → (handler, Island) }
//!     → IslandRouter (registry, conflict checks)
//!     → axum Router (path match) → method lookup → Props in extensions
//!     → handler → Payload::marshal | Props::render → response
//! ```

// Core
pub mod context;
pub mod error;
pub mod island;
pub mod payload;
pub mod render;
pub mod routing;

// Serving
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

// Demo islands
pub mod greeting;

pub use config::OasisConfig;
pub use context::{props_for_request, Props};
pub use error::{IslandError, IslandResult};
pub use http::HttpServer;
pub use island::{Island, PropStore};
pub use lifecycle::Shutdown;
pub use payload::Payload;
pub use render::{Fragment, Precedence};
pub use routing::{Endpoint, HttpMethod, IslandRouter};
