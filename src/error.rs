//! Error taxonomy for island registration and request-time access.
//!
//! Registration errors (`RegistrationConflict`, `RouteConflict`,
//! `InvalidName`, `InvalidRoute`) indicate a programming defect and are
//! expected to halt startup. Everything else surfaces to handlers as a value.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::HttpMethod;

/// Errors produced by the island layer.
#[derive(Debug, Error)]
pub enum IslandError {
    /// A (route, method) pair was registered twice.
    #[error("route {route} already has a handler for {method}")]
    RegistrationConflict { route: String, method: HttpMethod },

    /// A route is claimed both by a data route and by island endpoints.
    #[error("route {route} is already served by a data route")]
    RouteConflict { route: String },

    /// Island identifier is empty or blank.
    #[error("invalid island name: {0:?}")]
    InvalidName(String),

    /// Route is not a usable path pattern.
    #[error("invalid route: {0:?}")]
    InvalidRoute(String),

    /// Props were requested on a request that was not dispatched to an island.
    #[error("request is not bound to an island")]
    NoBinding,

    /// The island has no prop under this key.
    #[error("island has no prop {key:?}")]
    MissingProp { key: String },

    /// The stored prop does not have the shape the caller asked for.
    #[error("prop {key:?} is not a {expected}: {reason}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        reason: String,
    },

    /// A value could not be converted to the wire format.
    #[error("value for {key:?} is not serializable: {reason}")]
    Serialization { key: String, reason: String },
}

/// Result type for island operations.
pub type IslandResult<T> = Result<T, IslandError>;

impl IslandError {
    /// Status a handler should answer with when it gives up on this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for IslandError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Island request failed");
        (self.status_code(), self.to_string()).into_response()
    }
}
