//! Warehouse catalog.
//!
//! # Data Flow
//! ```text
//! WarehouseConfig[] (from config file)
//!     → WarehouseCatalog::from_config
//!     → per-city index: city → serving warehouses, city → serving hubs
//!     → read by the route planner on first lookup of a city
//! ```
//!
//! # Design Decisions
//! - Compiled once per config load, immutable afterwards; reloads build a
//!   fresh catalog and swap it in whole
//! - City identifiers are normalized to lowercase so lookups are
//!   case-insensitive
//! - A city nobody serves is not an error: it resolves to empty sets

use std::collections::HashMap;

use crate::config::schema::WarehouseConfig;

/// A warehouse known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    /// Unique warehouse name.
    pub name: String,
    /// Whether this warehouse acts as a transshipment hub.
    pub hub: bool,
}

/// Immutable city → warehouse index compiled from configuration.
#[derive(Debug, Default)]
pub struct WarehouseCatalog {
    by_city: HashMap<String, Vec<Warehouse>>,
    warehouse_count: usize,
}

impl WarehouseCatalog {
    /// Compile the per-city index from configured warehouse entries.
    ///
    /// Entries keep their configuration order within each city, so route
    /// generation is deterministic for a given config.
    pub fn from_config(warehouses: &[WarehouseConfig]) -> Self {
        let mut by_city: HashMap<String, Vec<Warehouse>> = HashMap::new();
        for entry in warehouses {
            for city in &entry.serves {
                by_city
                    .entry(normalize_city(city))
                    .or_default()
                    .push(Warehouse {
                        name: entry.name.clone(),
                        hub: entry.hub,
                    });
            }
        }
        Self {
            by_city,
            warehouse_count: warehouses.len(),
        }
    }

    /// All warehouses serving `city`, in configuration order.
    pub fn warehouses_serving(&self, city: &str) -> &[Warehouse] {
        self.by_city
            .get(&normalize_city(city))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The hubs among the warehouses serving `city`.
    pub fn hubs_serving(&self, city: &str) -> Vec<&Warehouse> {
        self.warehouses_serving(city)
            .iter()
            .filter(|w| w.hub)
            .collect()
    }

    /// Cities with at least one serving warehouse.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.by_city.keys().map(String::as_str)
    }

    /// Total number of configured warehouses.
    pub fn warehouse_count(&self) -> usize {
        self.warehouse_count
    }
}

fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}
