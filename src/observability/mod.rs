//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / context produce:
//!     → logging.rs (tracing events, fmt subscriber)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
