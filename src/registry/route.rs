//! The route record served by the registry.

use serde::{Deserialize, Serialize};

use crate::registry::ids::{RouteId, RouteKind};

/// A generated route from a city to a warehouse.
///
/// `stops` is the ordered itinerary: `[city, warehouse]` for direct routes,
/// `[city, hub, warehouse]` for multi-hop routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Identifier unique within `kind` for the process lifetime.
    pub id: RouteId,
    /// City this route serves.
    pub city: String,
    /// Which identifier space the route belongs to.
    pub kind: RouteKind,
    /// Ordered stop list, starting at the city.
    pub stops: Vec<String>,
}

impl Route {
    /// Build a direct route: city straight to a warehouse.
    pub fn direct(id: RouteId, city: impl Into<String>, warehouse: impl Into<String>) -> Self {
        let city = city.into();
        let stops = vec![city.clone(), warehouse.into()];
        Self {
            id,
            city,
            kind: RouteKind::Direct,
            stops,
        }
    }

    /// Build a multi-hop route: city through a hub to a warehouse.
    pub fn multihop(
        id: RouteId,
        city: impl Into<String>,
        hub: impl Into<String>,
        warehouse: impl Into<String>,
    ) -> Self {
        let city = city.into();
        let stops = vec![city.clone(), hub.into(), warehouse.into()];
        Self {
            id,
            city,
            kind: RouteKind::Multihop,
            stops,
        }
    }

    /// The terminal warehouse of the itinerary.
    pub fn destination(&self) -> Option<&str> {
        self.stops.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_route_shape() {
        let route = Route::direct(RouteId(7), "hamburg", "wh-north");
        assert_eq!(route.kind, RouteKind::Direct);
        assert_eq!(route.stops, vec!["hamburg", "wh-north"]);
        assert_eq!(route.destination(), Some("wh-north"));
    }

    #[test]
    fn test_multihop_route_shape() {
        let route = Route::multihop(RouteId(9), "hamburg", "hub-central", "wh-south");
        assert_eq!(route.kind, RouteKind::Multihop);
        assert_eq!(route.stops, vec!["hamburg", "hub-central", "wh-south"]);
    }
}
