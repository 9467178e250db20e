//! The dynamic route registry.
//!
//! # Responsibilities
//! - Serve per-city route lists, generating and caching them on first access
//! - Issue route identifiers that stay unique under concurrent creation
//! - Provide consistent snapshots for the status surfaces
//!
//! # Design Decisions
//! - One concurrent map per route kind, keyed by normalized city; values are
//!   `Arc<[Route]>` so a cached list is inserted whole and shared cheaply
//! - Population goes through the map's entry API: the shard lock spans the
//!   absence check and the insert, so racing first lookups serialize and a
//!   city's list is generated exactly once
//! - The generate path touches only the planner and the atomic counters,
//!   never the maps, so it cannot deadlock against its own shard lock
//! - Caches are never invalidated; a populated city returns the same list
//!   until process exit

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;

use crate::config::schema::CounterConfig;
use crate::observability::metrics;
use crate::registry::ids::{IdAllocator, RouteKind};
use crate::registry::planner::{RouteDraft, RoutePlanner};
use crate::registry::route::Route;

/// Process-wide registry of generated routes.
pub struct RouteRegistry {
    planner: Arc<dyn RoutePlanner>,
    direct: DashMap<String, Arc<[Route]>>,
    multihop: DashMap<String, Arc<[Route]>>,
    direct_ids: IdAllocator,
    multihop_ids: IdAllocator,
}

/// Point-in-time view of the registry for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySummary {
    pub cities_cached: usize,
    pub direct_routes: usize,
    pub multihop_routes: usize,
    pub direct_ids_issued: u64,
    pub multihop_ids_issued: u64,
    pub next_direct_id: u64,
    pub next_multihop_id: u64,
}

/// Per-city cache occupancy, for the listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CitySummary {
    pub city: String,
    pub direct_routes: usize,
    pub multihop_routes: usize,
}

impl RouteRegistry {
    /// Create an empty registry with counters at their configured starts.
    pub fn new(planner: Arc<dyn RoutePlanner>, counters: CounterConfig) -> Self {
        Self {
            planner,
            direct: DashMap::new(),
            multihop: DashMap::new(),
            direct_ids: IdAllocator::new(counters.direct_start_id),
            multihop_ids: IdAllocator::new(counters.multihop_start_id),
        }
    }

    /// Cached routes for `city`, generating them on first access.
    ///
    /// Returns direct routes, followed by multi-hop routes when
    /// `include_multihop` is set. Safe to call from any number of threads;
    /// racing first-time lookups for one city agree on a single cached list.
    pub fn routes_for_city(&self, city: &str, include_multihop: bool) -> Vec<Route> {
        let mut routes: Vec<Route> = self.create_direct_routes(city).to_vec();
        if include_multihop {
            routes.extend(self.create_multihop_routes(city).iter().cloned());
        }
        routes
    }

    /// Direct routes for `city`: one per warehouse serving it, cached after
    /// the first call.
    pub fn create_direct_routes(&self, city: &str) -> Arc<[Route]> {
        self.get_or_generate(RouteKind::Direct, city)
    }

    /// Multi-hop routes for `city`: one per (hub, warehouse) pair serving
    /// it, cached after the first call.
    pub fn create_multihop_routes(&self, city: &str) -> Arc<[Route]> {
        self.get_or_generate(RouteKind::Multihop, city)
    }

    fn get_or_generate(&self, kind: RouteKind, city: &str) -> Arc<[Route]> {
        let key = normalize_city(city);
        let map = self.map_for(kind);

        // Fast path: steady-state lookups only take the shard read lock.
        if let Some(cached) = map.get(&key) {
            metrics::record_cache_hit(kind);
            return cached.value().clone();
        }

        // Slow path: the entry holds the shard write lock across the
        // re-check and the insert, so exactly one caller generates.
        let routes = map
            .entry(key.clone())
            .or_insert_with(|| self.generate(kind, &key))
            .value()
            .clone();
        metrics::record_cached_cities(kind, map.len());
        routes
    }

    fn generate(&self, kind: RouteKind, city: &str) -> Arc<[Route]> {
        let (drafts, allocator) = match kind {
            RouteKind::Direct => (self.planner.direct_drafts(city), &self.direct_ids),
            RouteKind::Multihop => (self.planner.multihop_drafts(city), &self.multihop_ids),
        };
        let routes: Vec<Route> = drafts
            .into_iter()
            .map(|RouteDraft { stops }| Route {
                id: allocator.allocate(),
                city: city.to_string(),
                kind,
                stops,
            })
            .collect();

        metrics::record_route_generation(kind, routes.len());
        tracing::debug!(
            city,
            kind = %kind,
            routes = routes.len(),
            "Generated route list"
        );
        routes.into()
    }

    fn map_for(&self, kind: RouteKind) -> &DashMap<String, Arc<[Route]>> {
        match kind {
            RouteKind::Direct => &self.direct,
            RouteKind::Multihop => &self.multihop,
        }
    }

    /// Cities with at least one populated cache, sorted by name.
    ///
    /// Entries are inserted whole, so the listing never sees a
    /// half-populated city; counts for a city settle as soon as its entry
    /// is visible.
    pub fn cities(&self) -> Vec<CitySummary> {
        let mut by_city: std::collections::BTreeMap<String, (usize, usize)> =
            std::collections::BTreeMap::new();
        for entry in self.direct.iter() {
            by_city.entry(entry.key().clone()).or_default().0 = entry.value().len();
        }
        for entry in self.multihop.iter() {
            by_city.entry(entry.key().clone()).or_default().1 = entry.value().len();
        }
        by_city
            .into_iter()
            .map(|(city, (direct_routes, multihop_routes))| CitySummary {
                city,
                direct_routes,
                multihop_routes,
            })
            .collect()
    }

    /// Summary counters for the status endpoint.
    pub fn summary(&self) -> RegistrySummary {
        let direct_routes: usize = self.direct.iter().map(|e| e.value().len()).sum();
        let multihop_routes: usize = self.multihop.iter().map(|e| e.value().len()).sum();
        let cities: std::collections::HashSet<String> = self
            .direct
            .iter()
            .map(|e| e.key().clone())
            .chain(self.multihop.iter().map(|e| e.key().clone()))
            .collect();
        RegistrySummary {
            cities_cached: cities.len(),
            direct_routes,
            multihop_routes,
            direct_ids_issued: self.direct_ids.issued(),
            multihop_ids_issued: self.multihop_ids.issued(),
            next_direct_id: self.direct_ids.peek(),
            next_multihop_id: self.multihop_ids.peek(),
        }
    }
}

fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WarehouseCatalog;
    use crate::config::schema::WarehouseConfig;
    use crate::registry::planner::CatalogPlanner;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Planner with fixed drafts that counts how often it is asked.
    struct CountingPlanner {
        direct_calls: AtomicUsize,
        multihop_calls: AtomicUsize,
        warehouses: Vec<String>,
    }

    impl CountingPlanner {
        fn new(warehouses: &[&str]) -> Self {
            Self {
                direct_calls: AtomicUsize::new(0),
                multihop_calls: AtomicUsize::new(0),
                warehouses: warehouses.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl RoutePlanner for CountingPlanner {
        fn direct_drafts(&self, city: &str) -> Vec<RouteDraft> {
            self.direct_calls.fetch_add(1, Ordering::SeqCst);
            self.warehouses
                .iter()
                .map(|w| RouteDraft::new(vec![city.to_string(), w.clone()]))
                .collect()
        }

        fn multihop_drafts(&self, city: &str) -> Vec<RouteDraft> {
            self.multihop_calls.fetch_add(1, Ordering::SeqCst);
            self.warehouses
                .iter()
                .map(|w| RouteDraft::new(vec![city.to_string(), "hub".to_string(), w.clone()]))
                .collect()
        }
    }

    fn counters(direct: u64, multihop: u64) -> CounterConfig {
        CounterConfig {
            direct_start_id: direct,
            multihop_start_id: multihop,
        }
    }

    fn registry_with(warehouses: &[&str]) -> (Arc<CountingPlanner>, RouteRegistry) {
        let planner = Arc::new(CountingPlanner::new(warehouses));
        let registry = RouteRegistry::new(planner.clone(), counters(1000, 5000));
        (planner, registry)
    }

    #[test]
    fn test_population_is_idempotent() {
        let (planner, registry) = registry_with(&["wh-1", "wh-2"]);

        let first = registry.create_direct_routes("hamburg");
        let second = registry.create_direct_routes("hamburg");
        let third = registry.create_direct_routes("Hamburg ");

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(planner.direct_calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id.0, 1000);
        assert_eq!(first[1].id.0, 1001);
    }

    #[test]
    fn test_identifier_spaces_are_independent() {
        let (_, registry) = registry_with(&["wh-1"]);

        let direct = registry.create_direct_routes("lyon");
        let multihop = registry.create_multihop_routes("lyon");

        assert_eq!(direct[0].id.0, 1000);
        assert_eq!(direct[0].kind, RouteKind::Direct);
        assert_eq!(multihop[0].id.0, 5000);
        assert_eq!(multihop[0].kind, RouteKind::Multihop);
    }

    #[test]
    fn test_include_multihop_flag() {
        let (_, registry) = registry_with(&["wh-1", "wh-2"]);

        let direct_only = registry.routes_for_city("turin", false);
        assert_eq!(direct_only.len(), 2);
        assert!(direct_only.iter().all(|r| r.kind == RouteKind::Direct));

        let both = registry.routes_for_city("turin", true);
        assert_eq!(both.len(), 4);
        assert_eq!(
            both.iter().filter(|r| r.kind == RouteKind::Multihop).count(),
            2
        );
    }

    #[test]
    fn test_unknown_city_caches_empty_list() {
        let (planner, registry) = registry_with(&[]);

        assert!(registry.routes_for_city("nowhere", true).is_empty());
        assert!(registry.routes_for_city("nowhere", true).is_empty());
        // The empty result is cached like any other.
        assert_eq!(planner.direct_calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.summary().cities_cached, 1);
    }

    #[test]
    fn test_concurrent_lookups_agree_and_generate_once() {
        const THREADS: usize = 16;

        let planner = Arc::new(CountingPlanner::new(&["wh-1", "wh-2", "wh-3"]));
        let registry = Arc::new(RouteRegistry::new(planner.clone(), counters(1000, 5000)));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.routes_for_city("hamburg", true))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for result in &results[1..] {
            assert_eq!(result, &results[0], "threads observed different lists");
        }
        assert_eq!(planner.direct_calls.load(Ordering::SeqCst), 1);
        assert_eq!(planner.multihop_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_104_concurrent_creations_have_distinct_ids() {
        // 8 cities, 13 warehouses serving each: 104 routes, generated under
        // 104 racing requests, must come out with 104 distinct identifiers.
        const CITIES: usize = 8;
        const WAREHOUSES: usize = 13;
        const REQUESTS: usize = 104;

        let warehouse_names: Vec<String> =
            (0..WAREHOUSES).map(|i| format!("wh-{}", i)).collect();
        let config: Vec<WarehouseConfig> = warehouse_names
            .iter()
            .map(|name| WarehouseConfig {
                name: name.clone(),
                serves: (0..CITIES).map(|c| format!("city-{}", c)).collect(),
                hub: false,
            })
            .collect();
        let planner = Arc::new(CatalogPlanner::new(WarehouseCatalog::from_config(&config)));
        let registry = Arc::new(RouteRegistry::new(planner, counters(1000, 5000)));

        let handles: Vec<_> = (0..REQUESTS)
            .map(|i| {
                let registry = registry.clone();
                let city = format!("city-{}", i % CITIES);
                std::thread::spawn(move || registry.create_direct_routes(&city))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ids = HashSet::new();
        for summary in registry.cities() {
            assert_eq!(summary.direct_routes, WAREHOUSES);
        }
        for city in 0..CITIES {
            for route in registry.create_direct_routes(&format!("city-{}", city)).iter() {
                assert!(ids.insert(route.id), "identifier {} issued twice", route.id);
            }
        }
        assert_eq!(ids.len(), CITIES * WAREHOUSES);
        assert_eq!(registry.summary().direct_ids_issued, (CITIES * WAREHOUSES) as u64);
    }

    #[test]
    fn test_snapshots_never_observe_partial_entries() {
        const CITIES: usize = 32;

        let planner = Arc::new(CountingPlanner::new(&["wh-1", "wh-2", "wh-3", "wh-4"]));
        let registry = Arc::new(RouteRegistry::new(planner, counters(1000, 5000)));

        let writer = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for i in 0..CITIES {
                    registry.create_direct_routes(&format!("city-{}", i));
                }
            })
        };
        let reader = {
            let registry = registry.clone();
            std::thread::spawn(move || loop {
                let cities = registry.cities();
                // An entry is either absent or complete, never half-built.
                for summary in &cities {
                    assert_eq!(summary.direct_routes, 4, "partial entry for {}", summary.city);
                }
                if cities.len() == CITIES {
                    break;
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
    }

    #[test]
    fn test_catalog_reload_does_not_touch_populated_cities() {
        fn catalog(entries: &[(&str, &[&str])]) -> WarehouseCatalog {
            let configs: Vec<_> = entries
                .iter()
                .map(|(name, serves)| WarehouseConfig {
                    name: name.to_string(),
                    serves: serves.iter().map(|s| s.to_string()).collect(),
                    hub: false,
                })
                .collect();
            WarehouseCatalog::from_config(&configs)
        }

        let planner = Arc::new(CatalogPlanner::new(catalog(&[("wh-1", &["turin", "lyon"])])));
        let registry = RouteRegistry::new(planner.clone(), counters(1000, 5000));

        let before = registry.create_direct_routes("turin");
        assert_eq!(before.len(), 1);

        planner.reload(catalog(&[
            ("wh-1", &["turin", "lyon"]),
            ("wh-2", &["turin", "lyon"]),
        ]));

        // Already populated city keeps its cached list.
        assert_eq!(registry.create_direct_routes("turin"), before);
        // A city populated after the reload sees the new catalog.
        assert_eq!(registry.create_direct_routes("lyon").len(), 2);
    }

    #[test]
    fn test_summary_reflects_population() {
        let (_, registry) = registry_with(&["wh-1", "wh-2"]);

        registry.create_direct_routes("hamburg");
        registry.create_multihop_routes("lyon");

        let summary = registry.summary();
        assert_eq!(summary.cities_cached, 2);
        assert_eq!(summary.direct_routes, 2);
        assert_eq!(summary.multihop_routes, 2);
        assert_eq!(summary.next_direct_id, 1002);
        assert_eq!(summary.next_multihop_id, 5002);

        let cities = registry.cities();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].city, "hamburg");
        assert_eq!(cities[0].direct_routes, 2);
        assert_eq!(cities[0].multihop_routes, 0);
    }
}
