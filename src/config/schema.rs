//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the route
//! registry service. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the route registry service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Listener configuration for the query API.
    pub listener: ListenerConfig,

    /// Start values for the two route identifier counters.
    pub counters: CounterConfig,

    /// Warehouse catalog entries.
    pub warehouses: Vec<WarehouseConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Start values for the route identifier counters.
///
/// The direct and multi-hop spaces are independent; the defaults keep them
/// visually distinct in logs but nothing requires them to be disjoint.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct CounterConfig {
    /// First identifier issued for direct routes.
    pub direct_start_id: u64,

    /// First identifier issued for multi-hop routes.
    pub multihop_start_id: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            direct_start_id: 1000,
            multihop_start_id: 5000,
        }
    }
}

/// A warehouse entry in the catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WarehouseConfig {
    /// Unique warehouse name.
    pub name: String,

    /// Cities this warehouse serves.
    pub serves: Vec<String>,

    /// Whether this warehouse acts as a transshipment hub.
    #[serde(default)]
    pub hub: bool,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter (overridden by RUST_LOG).
    pub log_filter: String,

    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Bind address for the metrics exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "supply_router=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}
