//! Configuration schema definitions.
//!
//! This module defines the route file structure.
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::routing::error::ConfigurationResult;
use crate::routing::table::{Parameter, RouteDeclaration, RouteTable};

/// Root configuration: the deeplink root plus its routes.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeeplinkConfig {
    /// Schemes accepted for every route (e.g. `https`, `myapp`).
    pub schemas: Vec<String>,

    /// Hosts used by routes that do not declare their own.
    pub default_hosts: Vec<String>,

    /// Route definitions, in precedence order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl DeeplinkConfig {
    /// Route declarations in file order.
    pub fn declarations(&self) -> Vec<RouteDeclaration> {
        self.routes.iter().map(RouteDeclaration::from).collect()
    }

    /// Compile the configured routes into a route table.
    pub fn build_table(&self) -> ConfigurationResult<RouteTable> {
        RouteTable::build(&self.schemas, &self.default_hosts, self.declarations())
    }
}

/// A single route definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier, reported back on match.
    pub name: String,

    /// Path template, e.g. `/profile/{userId}?tab={tab}`.
    pub path: String,

    /// Host override. Empty means the default hosts apply.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Parameters bound from placeholders or the query string.
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

/// A declared route parameter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParameterConfig {
    pub name: String,

    /// Optional parameters never disqualify a route (default: false).
    #[serde(default)]
    pub optional: bool,
}

impl From<&ParameterConfig> for Parameter {
    fn from(config: &ParameterConfig) -> Self {
        Parameter {
            name: config.name.clone(),
            mandatory: !config.optional,
        }
    }
}

impl From<&RouteConfig> for RouteDeclaration {
    fn from(config: &RouteConfig) -> Self {
        RouteDeclaration {
            name: config.name.clone(),
            path: config.path.clone(),
            hosts: config.hosts.clone(),
            parameters: config.parameters.iter().map(Parameter::from).collect(),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}
