//! Metrics collection and exposition.
//!
//! # Metrics
//! - `docs_requests_total` (counter): requests by route kind and status
//! - `docs_request_duration_seconds` (histogram): latency by route kind
//! - `docs_fallback_total` (counter): error fallback outcomes
//!
//! # Design Decisions
//! - Route kinds, not raw paths, as labels (bounded cardinality)
//! - Exporter is optional; recording without one is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "docs_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("docs_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record an error fallback decision.
pub fn record_fallback(outcome: &'static str) {
    ::metrics::counter!("docs_fallback_total", "outcome" => outcome).increment(1);
}
