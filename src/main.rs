//! Supply-Chain Route Registry Service
//!
//! Serves per-city supply routes to mitigation and optimization callers,
//! generating and caching them on first access with process-unique
//! identifiers per route kind.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │              SUPPLY ROUTER                    │
//!                      │                                               │
//!   GET /routes/{city} │  ┌─────────┐    ┌──────────────────────────┐ │
//!   ───────────────────┼─▶│  http   │───▶│        registry          │ │
//!                      │  │ server  │    │  city cache ── planner   │ │
//!   JSON route list    │  └─────────┘    │  id allocators (atomic)  │ │
//!   ◀──────────────────┼────────────────│                          │ │
//!                      │                 └────────────┬─────────────┘ │
//!                      │                              │               │
//!                      │                      ┌───────▼──────┐        │
//!                      │                      │   catalog    │        │
//!                      │                      │ (warehouses) │        │
//!                      │                      └───────▲──────┘        │
//!                      │                              │ reload        │
//!                      │  ┌────────────────────────────────────────┐  │
//!                      │  │          Cross-Cutting Concerns         │  │
//!                      │  │  ┌────────┐ ┌─────────────┐ ┌────────┐ │  │
//!                      │  │  │ config │ │observability│ │lifecycle│ │  │
//!                      │  │  └────────┘ └─────────────┘ └────────┘ │  │
//!                      │  └────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod catalog;
pub mod config;
pub mod http;
pub mod registry;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::catalog::WarehouseCatalog;
use crate::config::watcher::ConfigWatcher;
use crate::config::RegistryConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::registry::{CatalogPlanner, RouteRegistry};

#[derive(Parser)]
#[command(name = "supply-router")]
#[command(about = "Supply-chain route registry service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config before logging: the log filter comes from config. Load errors
    // surface on stderr through the returned error.
    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RegistryConfig::default(),
    };

    observability::logging::init_logging(&config.observability.log_filter);

    tracing::info!("supply-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        warehouses = config.warehouses.len(),
        direct_start_id = config.counters.direct_start_id,
        multihop_start_id = config.counters.multihop_start_id,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Build the core: catalog → planner → registry.
    let planner = Arc::new(CatalogPlanner::new(WarehouseCatalog::from_config(
        &config.warehouses,
    )));
    let registry = Arc::new(RouteRegistry::new(planner.clone(), config.counters));

    // Watch the config file and apply catalog-only reloads. Counters and
    // populated caches are process-lifetime state and stay untouched.
    let _watcher = match &cli.config {
        Some(path) => {
            let (watcher, mut updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            let planner = planner.clone();
            tokio::spawn(async move {
                while let Some(new_config) = updates.recv().await {
                    tracing::info!(
                        warehouses = new_config.warehouses.len(),
                        "Applying reloaded warehouse catalog"
                    );
                    planner.reload(WarehouseCatalog::from_config(&new_config.warehouses));
                }
            });
            Some(handle)
        }
        None => None,
    };

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Translate SIGINT/SIGTERM into graceful shutdown.
    let shutdown = Arc::new(Shutdown::new());
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::watch_signals(&signal_shutdown).await;
    });

    // Create and run HTTP server
    let server = HttpServer::new(config, registry);
    server.run(listener, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
