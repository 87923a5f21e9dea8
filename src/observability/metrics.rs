//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method and status
//! - `api_request_duration_seconds` (histogram): latency by method
//!
//! Recording is a no-op until an exporter is installed, so the access log
//! can record unconditionally.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Methods recorded under their own label; anything else counts as `OTHER`.
const KNOWN_METHODS: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "CONNECT", "TRACE",
];

/// Label value for `method`, bounded to the standard methods.
pub fn method_label(method: &str) -> &'static str {
    KNOWN_METHODS
        .iter()
        .find(|known| **known == method)
        .copied()
        .unwrap_or("OTHER")
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, latency: Duration) {
    let method = method_label(method);

    metrics::counter!(
        "api_requests_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("api_request_duration_seconds", "method" => method)
        .record(latency.as_secs_f64());
}
