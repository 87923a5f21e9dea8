//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request:
//!     → TraceLayer span (request_id, method, uri)
//!     → access log event (http::middleware::access_log)
//!     → metrics.rs (counter + latency histogram)
//!
//! Consumers:
//!     → stdout (pretty in development, JSON in production)
//!     → Prometheus scrape endpoint (when METRICS_ADDR is set)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
