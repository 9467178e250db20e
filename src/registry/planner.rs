//! Route planning seam.
//!
//! # Responsibilities
//! - Decide which itineraries exist for a city, without assigning identifiers
//! - Isolate the registry from where warehouse knowledge comes from
//!
//! # Design Decisions
//! - Planners return drafts (stop lists); the registry owns the counters and
//!   stamps identifiers, so identifier uniqueness cannot depend on planner
//!   implementations
//! - The production planner reads the catalog through an `ArcSwap`, so a
//!   config reload swaps the catalog atomically without touching routes that
//!   were already generated
//! - Planning must not block: implementations may only read immutable or
//!   atomically swapped state

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::catalog::WarehouseCatalog;

/// An itinerary produced by a planner, not yet assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDraft {
    /// Ordered stop list, starting at the city.
    pub stops: Vec<String>,
}

impl RouteDraft {
    pub fn new(stops: Vec<String>) -> Self {
        Self { stops }
    }
}

/// Produces route drafts for a city.
pub trait RoutePlanner: Send + Sync {
    /// One draft per warehouse serving the city.
    fn direct_drafts(&self, city: &str) -> Vec<RouteDraft>;

    /// One draft per (hub, warehouse) pair serving the city.
    fn multihop_drafts(&self, city: &str) -> Vec<RouteDraft>;
}

/// Planner backed by the configured warehouse catalog.
pub struct CatalogPlanner {
    catalog: ArcSwap<WarehouseCatalog>,
}

impl CatalogPlanner {
    pub fn new(catalog: WarehouseCatalog) -> Self {
        Self {
            catalog: ArcSwap::from_pointee(catalog),
        }
    }

    /// Replace the catalog. Cities generated after this call see the new
    /// catalog; already cached cities are unaffected.
    pub fn reload(&self, catalog: WarehouseCatalog) {
        self.catalog.store(Arc::new(catalog));
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Arc<WarehouseCatalog> {
        self.catalog.load_full()
    }
}

impl RoutePlanner for CatalogPlanner {
    fn direct_drafts(&self, city: &str) -> Vec<RouteDraft> {
        let catalog = self.catalog.load();
        catalog
            .warehouses_serving(city)
            .iter()
            .map(|w| RouteDraft::new(vec![city.to_string(), w.name.clone()]))
            .collect()
    }

    fn multihop_drafts(&self, city: &str) -> Vec<RouteDraft> {
        let catalog = self.catalog.load();
        let warehouses = catalog.warehouses_serving(city);
        let mut drafts = Vec::new();
        for hub in warehouses.iter().filter(|w| w.hub) {
            for warehouse in warehouses.iter().filter(|w| w.name != hub.name) {
                drafts.push(RouteDraft::new(vec![
                    city.to_string(),
                    hub.name.clone(),
                    warehouse.name.clone(),
                ]));
            }
        }
        drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::WarehouseConfig;

    fn catalog(entries: &[(&str, &[&str], bool)]) -> WarehouseCatalog {
        let configs: Vec<_> = entries
            .iter()
            .map(|(name, serves, hub)| WarehouseConfig {
                name: name.to_string(),
                serves: serves.iter().map(|s| s.to_string()).collect(),
                hub: *hub,
            })
            .collect();
        WarehouseCatalog::from_config(&configs)
    }

    #[test]
    fn test_direct_drafts_one_per_warehouse() {
        let planner = CatalogPlanner::new(catalog(&[
            ("wh-1", &["turin"], false),
            ("wh-2", &["turin"], false),
        ]));
        let drafts = planner.direct_drafts("turin");
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].stops, vec!["turin", "wh-1"]);
        assert_eq!(drafts[1].stops, vec!["turin", "wh-2"]);
    }

    #[test]
    fn test_multihop_drafts_pair_hubs_with_warehouses() {
        let planner = CatalogPlanner::new(catalog(&[
            ("hub-1", &["turin"], true),
            ("wh-1", &["turin"], false),
            ("wh-2", &["turin"], false),
        ]));
        let drafts = planner.multihop_drafts("turin");
        // hub-1 → wh-1, hub-1 → wh-2; the hub never routes to itself.
        assert_eq!(drafts.len(), 2);
        assert!(drafts.iter().all(|d| d.stops[1] == "hub-1"));
        assert!(drafts.iter().all(|d| d.stops.len() == 3));
    }

    #[test]
    fn test_no_hubs_means_no_multihop() {
        let planner = CatalogPlanner::new(catalog(&[("wh-1", &["turin"], false)]));
        assert!(planner.multihop_drafts("turin").is_empty());
    }

    #[test]
    fn test_reload_swaps_catalog() {
        let planner = CatalogPlanner::new(catalog(&[("wh-1", &["turin"], false)]));
        assert_eq!(planner.direct_drafts("turin").len(), 1);

        planner.reload(catalog(&[
            ("wh-1", &["turin"], false),
            ("wh-2", &["turin"], false),
        ]));
        assert_eq!(planner.direct_drafts("turin").len(), 2);
    }
}
