//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and drain gracefully on shutdown
//!
//! # Design Decisions
//! - Request ID added as early as possible and propagated to responses
//! - The registry is shared state; handlers never hold locks across awaits
//!   because every registry operation is synchronous and short

use axum::{
    http::{HeaderValue, Request},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::RegistryConfig;
use crate::http::handlers;
use crate::lifecycle::Shutdown;
use crate::registry::RouteRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RouteRegistry>,
}

/// Attaches a UUID v4 request id to every incoming request.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// HTTP server for the route registry query API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given registry.
    pub fn new(config: RegistryConfig, registry: Arc<RouteRegistry>) -> Self {
        let state = AppState { registry };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RegistryConfig, state: AppState) -> Router {
        Router::new()
            .route("/routes/{city}", get(handlers::get_routes))
            .route("/cities", get(handlers::get_cities))
            .route("/status", get(handlers::get_status))
            .route("/healthz", get(handlers::healthz))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The assembled router, for in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener until
    /// shutdown is triggered, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: &Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut rx = shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = rx.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await
    }
}
