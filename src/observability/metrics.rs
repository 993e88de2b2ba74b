//! Metrics collection and exposition.
//!
//! # Metrics
//! - `oasis_requests_total` (counter): requests by method, route, island, status
//! - `oasis_request_duration_seconds` (histogram): dispatch latency
//! - `oasis_renders_total` (counter): island renders by island name
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so library users
//!   and tests pay nothing
//! - Unmatched requests use `"none"` for route and island labels

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, route: &str, island: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("island", island.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("oasis_requests_total", &labels).increment(1);
    metrics::histogram!("oasis_request_duration_seconds", &labels[..3])
        .record(start.elapsed().as_secs_f64());
}

/// Record one island render.
pub fn record_render(island: &str) {
    metrics::counter!("oasis_renders_total", "island" => island.to_string()).increment(1);
}
