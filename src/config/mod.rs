//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RegistryConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → catalog rebuilt and swapped into the planner
//!     → counters and populated route caches stay untouched
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; reloads replace the catalog only,
//!   because issued identifiers and cached routes are process-lifetime state
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{CounterConfig, ListenerConfig, ObservabilityConfig, RegistryConfig, WarehouseConfig};
pub use validation::{validate_config, ValidationError};
