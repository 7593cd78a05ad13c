//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route template, host set and parameter list
//! - Detect duplicate route names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeeplinkConfig → Result<(), Vec<ConfigurationError>>
//! - Runs the same compile pass as table construction, so a config that
//!   validates always builds

use crate::config::schema::DeeplinkConfig;
use crate::routing::error::ConfigurationError;
use crate::routing::table::RouteTable;

/// Validate a parsed configuration.
pub fn validate_config(config: &DeeplinkConfig) -> Result<(), Vec<ConfigurationError>> {
    RouteTable::validate(
        &config.schemas,
        &config.default_hosts,
        &config.declarations(),
    )
}
