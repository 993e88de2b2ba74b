//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, middleware stack)
//!     → request.rs (assign x-request-id)
//!     → routing (island dispatch)
//!     → handler writes the response
//! ```

pub mod request;
pub mod server;

pub use request::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
