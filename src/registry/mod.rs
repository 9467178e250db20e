//! Dynamic route registry subsystem.
//!
//! # Data Flow
//! ```text
//! routes_for_city(city, include_multihop)
//!     → store.rs (cache lookup, double-checked population)
//!     → planner.rs (itinerary drafts from the warehouse catalog)
//!     → ids.rs (atomic identifier allocation per kind)
//!     → Return: cached Arc<[Route]> shared with every caller
//! ```
//!
//! # Design Decisions
//! - Identifiers are global per kind, not per city; the allocators are
//!   atomic so no map lock serializes them
//! - A city's list is generated exactly once and never invalidated
//! - The planner is a trait so tests and future sources can replace the
//!   catalog without touching the cache discipline

pub mod ids;
pub mod planner;
pub mod route;
pub mod store;

pub use ids::{IdAllocator, RouteId, RouteKind};
pub use planner::{CatalogPlanner, RouteDraft, RoutePlanner};
pub use route::Route;
pub use store::{CitySummary, RegistrySummary, RouteRegistry};
