//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define registry metrics (lookups, generations, cache occupancy)
//! - Expose Prometheus-compatible metrics endpoint
//! - Track per-kind and aggregate metrics
//!
//! # Metrics
//! - `registry_lookups_total` (counter): route lookups by kind and outcome
//! - `registry_routes_generated_total` (counter): routes created by kind
//! - `registry_cached_cities` (gauge): populated cities by kind
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Labels carry the route kind only; city is unbounded cardinality
//! - Exporter runs on its own listener, separate from the query API

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

use crate::registry::ids::RouteKind;

/// Install the Prometheus exporter on `addr`.
///
/// Failure to install is logged, not fatal: the registry serves traffic
/// without metrics rather than refusing to start.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// A lookup answered from an already-populated cache.
pub fn record_cache_hit(kind: RouteKind) {
    counter!("registry_lookups_total", "kind" => kind.as_str(), "outcome" => "hit").increment(1);
}

/// A first-time generation of a city's route list.
pub fn record_route_generation(kind: RouteKind, routes: usize) {
    counter!("registry_lookups_total", "kind" => kind.as_str(), "outcome" => "generated")
        .increment(1);
    counter!("registry_routes_generated_total", "kind" => kind.as_str())
        .increment(routes as u64);
}

/// Current number of populated cities for a kind.
pub fn record_cached_cities(kind: RouteKind, cities: usize) {
    gauge!("registry_cached_cities", "kind" => kind.as_str()).set(cities as f64);
}
