//! Query API handlers.
//!
//! # Responsibilities
//! - Serve per-city route lists from the registry
//! - Expose cache occupancy and registry counters for operators
//!
//! # Design Decisions
//! - Read-only surface: nothing here mutates beyond the registry's own
//!   lazy population
//! - Unknown cities are a 200 with an empty list, matching the registry's
//!   no-error contract

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::registry::{CitySummary, RegistrySummary, Route};

#[derive(Debug, Deserialize)]
pub struct RoutesQuery {
    /// Include multi-hop routes in the response.
    #[serde(default)]
    pub include_multihop: bool,
}

#[derive(Serialize)]
pub struct CityRoutes {
    pub city: String,
    pub include_multihop: bool,
    pub count: usize,
    pub routes: Vec<Route>,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub registry: RegistrySummary,
}

pub async fn get_routes(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<RoutesQuery>,
) -> Json<CityRoutes> {
    let routes = state.registry.routes_for_city(&city, query.include_multihop);
    Json(CityRoutes {
        city,
        include_multihop: query.include_multihop,
        count: routes.len(),
        routes,
    })
}

pub async fn get_cities(State(state): State<AppState>) -> Json<Vec<CitySummary>> {
    Json(state.registry.cities())
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        registry: state.registry.summary(),
    })
}

pub async fn healthz() -> &'static str {
    "ok"
}
