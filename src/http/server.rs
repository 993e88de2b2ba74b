//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap the frozen island router with middleware (timeout, request ID, tracing)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::OasisConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::routing::IslandRouter;

/// HTTP server for island endpoints.
pub struct HttpServer {
    router: Router,
    config: OasisConfig,
}

impl HttpServer {
    /// Freeze `islands` and wrap it for serving.
    pub fn new(config: OasisConfig, islands: IslandRouter) -> Self {
        let router = Self::build_router(&config, islands);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &OasisConfig, islands: IslandRouter) -> Router {
        islands
            .into_router()
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &OasisConfig {
        &self.config
    }
}
