//! Metrics collection and exposition.
//!
//! # Metrics
//! - `forum_requests_rate_limited_total` (counter): rejected requests, by reason
//! - `forum_rate_limiter_tracked_clients` (gauge): entries in the limiter store
//!
//! # Design Decisions
//! - Recording is cheap (atomic updates through the `metrics` macros) and
//!   safe before an exporter is installed — events are simply dropped
//! - Exposition is Prometheus scrape on its own listener, off the request path

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged and otherwise ignored: the forum can serve
/// without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one rejected request.
pub fn record_rate_limited(reason: &'static str) {
    metrics::counter!("forum_requests_rate_limited_total", "reason" => reason).increment(1);
}

/// Record the limiter store size after an eviction sweep.
pub fn set_tracked_clients(count: usize) {
    metrics::gauge!("forum_rate_limiter_tracked_clients").set(count as f64);
}
