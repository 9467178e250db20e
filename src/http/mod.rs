//! HTTP query API subsystem.
//!
//! # Data Flow
//! ```text
//! GET /routes/{city}?include_multihop=…
//!     → server.rs (middleware: request id, trace, timeout)
//!     → handlers.rs (extract city and query)
//!     → registry (cached or freshly generated routes)
//!     → JSON response
//! ```
//!
//! # Design Decisions
//! - Read-only API; the only mutation is the registry's own lazy population
//! - No auth: the surface is an internal service endpoint
//! - Metrics are exposed by a separate exporter listener, not this router

pub mod handlers;
pub mod server;

pub use server::HttpServer;
