//! Supply-Chain Route Registry Service Library

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use config::RegistryConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::RouteRegistry;
