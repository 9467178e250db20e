//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check catalog integrity (unique warehouse names, non-empty coverage)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RegistryConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::RegistryConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener bind address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("metrics address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("warehouse at index {0} has an empty name")]
    EmptyWarehouseName(usize),

    #[error("warehouse '{0}' is defined more than once")]
    DuplicateWarehouse(String),

    #[error("warehouse '{0}' serves no city")]
    WarehouseServesNothing(String),

    #[error("warehouse '{0}' lists an empty city name")]
    EmptyCityName(String),
}

/// Check a parsed configuration for semantic problems.
///
/// Collects every problem rather than stopping at the first, so an operator
/// can fix a config file in one pass.
pub fn validate_config(config: &RegistryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for (index, warehouse) in config.warehouses.iter().enumerate() {
        if warehouse.name.trim().is_empty() {
            errors.push(ValidationError::EmptyWarehouseName(index));
            continue;
        }
        if !seen.insert(warehouse.name.clone()) {
            errors.push(ValidationError::DuplicateWarehouse(warehouse.name.clone()));
        }
        if warehouse.serves.is_empty() {
            errors.push(ValidationError::WarehouseServesNothing(warehouse.name.clone()));
        }
        if warehouse.serves.iter().any(|c| c.trim().is_empty()) {
            errors.push(ValidationError::EmptyCityName(warehouse.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
