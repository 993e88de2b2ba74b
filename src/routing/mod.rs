//! Routing subsystem: endpoints bound to islands.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Endpoint::new(route).handler(method, handler, island)
//!     → IslandRouter::add_endpoint (conflict checks, method map merge)
//!     → IslandRouter::into_router (freeze into axum Router)
//!
//! Request (path, method):
//!     → axum path match            (no match → 404)
//!     → router.rs method lookup    (no match → 405)
//!     → Props inserted into request extensions
//!     → bound handler
//! ```
//!
//! # Design Decisions
//! - Registry compiled at startup, immutable at runtime
//! - Methods are a closed enum, typos fail to compile
//! - Duplicate bindings are errors, never silent overwrites

pub mod endpoint;
pub mod method;
pub mod router;

pub use endpoint::{Binding, Endpoint};
pub use method::HttpMethod;
pub use router::IslandRouter;
