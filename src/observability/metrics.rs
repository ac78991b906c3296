//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nagira_requests_total` (counter): requests by route, status, format
//! - `nagira_request_duration_seconds` (histogram): latency by route
//! - `nagira_snapshot_refresh_total` (counter): refreshes by outcome
//! - `nagira_snapshot_hosts` (gauge): hosts in the current snapshot

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, format: &'static str, start: Instant) {
    counter!(
        "nagira_requests_total",
        "route" => route,
        "status" => status.to_string(),
        "format" => format
    )
    .increment(1);
    histogram!("nagira_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_refresh(outcome: &'static str) {
    counter!("nagira_snapshot_refresh_total", "outcome" => outcome).increment(1);
}

pub fn record_snapshot_hosts(hosts: usize) {
    gauge!("nagira_snapshot_hosts").set(hosts as f64);
}
