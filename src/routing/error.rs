//! Build-time and link-building errors.

use thiserror::Error;

use crate::routing::template::TemplateError;

/// A structural problem with the route declarations.
///
/// Always fatal: the route table is never built with any of these present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The table accepts no schema, so nothing could ever match.
    #[error("no schemas configured")]
    NoSchemas,

    /// A route was declared without a name.
    #[error("route with template {template:?} has an empty name")]
    EmptyRouteName { template: String },

    /// The route name has leading or trailing whitespace.
    #[error("route name {0:?} has surrounding whitespace")]
    RouteNameWhitespace(String),

    /// Two routes share a name.
    #[error("duplicate route name {0:?}")]
    DuplicateRoute(String),

    /// The route's path template is malformed.
    #[error("route {route:?}: {source}")]
    Template {
        route: String,
        #[source]
        source: TemplateError,
    },

    /// Neither the route nor the table provides a host.
    #[error("route {0:?} has no hosts and no default hosts are configured")]
    NoHosts(String),

    /// A parameter was declared without a name.
    #[error("route {0:?} declares a parameter with an empty name")]
    EmptyParameterName(String),

    /// The same parameter name is declared twice for one route.
    #[error("route {route:?} declares parameter {name:?} more than once")]
    DuplicateParameter { route: String, name: String },
}

/// Result type for route table construction.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// Errors building a concrete URL for a named route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// No route with that name exists.
    #[error("unknown route {0:?}")]
    UnknownRoute(String),

    /// A placeholder or mandatory parameter has no value.
    #[error("route {route:?} requires a value for parameter {name:?}")]
    MissingParameter { route: String, name: String },

    /// A placeholder value is empty, which would collapse its path segment.
    #[error("route {route:?} cannot place an empty value in path parameter {name:?}")]
    EmptyPathValue { route: String, name: String },
}
