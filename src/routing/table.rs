//! Route table construction.
//!
//! # Responsibilities
//! - Compile each declaration's path template
//! - Resolve the effective host set (override or table defaults, never merged)
//! - Reject structural problems eagerly, before any URL is matched
//! - Preserve declaration order, which is match precedence
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Validation and construction share one compile pass, so `validate` reports
//!   exactly the errors `build` would fail on
//! - No conflict detection: overlapping routes are legal, the earlier one wins

use std::collections::HashSet;

use serde::Serialize;

use crate::routing::error::{ConfigurationError, ConfigurationResult, LinkError};
use crate::routing::matcher::{Bindings, HostMatcher, SchemaMatcher};
use crate::routing::template::{self, PathSegment};
use crate::routing::url::percent_encode;

/// A named value a route binds, either from a placeholder or from the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    pub name: String,
    /// Whether the route is rejected when the parameter cannot be resolved.
    pub mandatory: bool,
}

impl Parameter {
    pub fn mandatory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mandatory: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mandatory: false,
        }
    }
}

/// Uncompiled route, as handed over by whatever front end discovers routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDeclaration {
    pub name: String,
    /// Path template, optionally followed by an informational query template.
    pub path: String,
    /// Host override; empty means "use the table defaults".
    pub hosts: Vec<String>,
    pub parameters: Vec<Parameter>,
}

impl RouteDeclaration {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            hosts: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Replace the table default hosts for this route.
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::mandatory(name));
        self
    }

    pub fn optional_param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::optional(name));
        self
    }
}

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    pub(crate) name: String,
    pub(crate) template: String,
    pub(crate) segments: Vec<PathSegment>,
    pub(crate) hosts: HostMatcher,
    pub(crate) parameters: Vec<Parameter>,
}

impl Route {
    /// Compile a single declaration against the table default hosts.
    pub fn compile(
        declaration: &RouteDeclaration,
        default_hosts: &HostMatcher,
    ) -> ConfigurationResult<Self> {
        let name = declaration.name.as_str();
        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyRouteName {
                template: declaration.path.clone(),
            });
        }
        if name.trim() != name {
            return Err(ConfigurationError::RouteNameWhitespace(name.to_owned()));
        }

        let segments =
            template::compile(&declaration.path).map_err(|source| ConfigurationError::Template {
                route: name.to_owned(),
                source,
            })?;

        let hosts = if declaration.hosts.is_empty() {
            default_hosts.clone()
        } else {
            HostMatcher::new(&declaration.hosts)
        };
        if hosts.is_empty() {
            return Err(ConfigurationError::NoHosts(name.to_owned()));
        }

        let mut seen = HashSet::new();
        for parameter in &declaration.parameters {
            if parameter.name.is_empty() {
                return Err(ConfigurationError::EmptyParameterName(name.to_owned()));
            }
            if !seen.insert(parameter.name.as_str()) {
                return Err(ConfigurationError::DuplicateParameter {
                    route: name.to_owned(),
                    name: parameter.name.clone(),
                });
            }
        }

        for key in template::query_keys(&declaration.path) {
            if !seen.contains(key) {
                tracing::warn!(
                    route = name,
                    key,
                    "Query template key is not a declared parameter and will not be bound"
                );
            }
        }

        Ok(Self {
            name: name.to_owned(),
            template: declaration.path.clone(),
            segments,
            hosts,
            parameters: declaration.parameters.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The template string as declared, query part included.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Effective hosts, lowercased.
    pub fn hosts(&self) -> &[String] {
        self.hosts.names()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Names bound positionally from the path.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Placeholder(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }

    /// A documentation link such as `https://example.com/example3/{id}/details/{name}`.
    pub fn example_url(&self, schema: &str) -> String {
        let host = self.hosts.names().first().map_or("", String::as_str);
        let slash = if self.template.starts_with('/') { "" } else { "/" };
        format!("{}://{}{}{}", schema, host, slash, self.template)
    }
}

/// The immutable, ordered set of compiled routes plus the accepted schemas.
#[derive(Debug, Clone)]
pub struct RouteTable {
    schemas: SchemaMatcher,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile the declarations, failing on the first configuration error.
    pub fn build<S, H, D>(schemas: S, default_hosts: H, declarations: D) -> ConfigurationResult<Self>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
        D: IntoIterator<Item = RouteDeclaration>,
    {
        let declarations: Vec<_> = declarations.into_iter().collect();
        let (table, mut errors) = Self::compile_all(schemas, default_hosts, &declarations);
        if errors.is_empty() {
            tracing::info!(
                routes = table.routes.len(),
                schemas = ?table.schemas.names(),
                "Route table built"
            );
            Ok(table)
        } else {
            Err(errors.swap_remove(0))
        }
    }

    /// Check the declarations and return every configuration error found.
    pub fn validate<S, H>(
        schemas: S,
        default_hosts: H,
        declarations: &[RouteDeclaration],
    ) -> Result<(), Vec<ConfigurationError>>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        let (_, errors) = Self::compile_all(schemas, default_hosts, declarations);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn compile_all<S, H>(
        schemas: S,
        default_hosts: H,
        declarations: &[RouteDeclaration],
    ) -> (Self, Vec<ConfigurationError>)
    where
        S: IntoIterator,
        S::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        let schemas = SchemaMatcher::new(schemas);
        let default_hosts = HostMatcher::new(default_hosts);
        let mut errors = Vec::new();
        let mut routes = Vec::with_capacity(declarations.len());
        let mut names = HashSet::new();

        if schemas.is_empty() {
            errors.push(ConfigurationError::NoSchemas);
        }

        for declaration in declarations {
            let name = declaration.name.as_str();
            if !name.trim().is_empty() && !names.insert(name) {
                errors.push(ConfigurationError::DuplicateRoute(name.to_owned()));
                continue;
            }
            match Route::compile(declaration, &default_hosts) {
                Ok(route) => {
                    tracing::debug!(
                        route = %route.name,
                        template = %route.template,
                        segments = route.segments.len(),
                        "Compiled route"
                    );
                    routes.push(route);
                }
                Err(e) => errors.push(e),
            }
        }

        (Self { schemas, routes }, errors)
    }

    pub fn schemas(&self) -> &SchemaMatcher {
        &self.schemas
    }

    /// Routes in precedence order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Schema used when rendering links.
    pub fn primary_schema(&self) -> &str {
        self.schemas.names().first().map_or("", String::as_str)
    }

    /// Build a concrete URL for the named route.
    ///
    /// Uses the primary schema and the route's first host. Placeholder values must
    /// be non-empty and are percent-encoded into the path; the remaining parameters
    /// that have an entry in `params` are appended to the query in declaration
    /// order (`Some(None)` renders a bare key).
    pub fn url_for(&self, name: &str, params: &Bindings) -> Result<String, LinkError> {
        let route = self
            .route(name)
            .ok_or_else(|| LinkError::UnknownRoute(name.to_owned()))?;
        let missing = |param: &str| LinkError::MissingParameter {
            route: route.name.clone(),
            name: param.to_owned(),
        };

        let host = route.hosts().first().map_or("", String::as_str);
        let mut url = format!("{}://{}", self.primary_schema(), host);

        for segment in &route.segments {
            url.push('/');
            match segment {
                PathSegment::Literal(value) => url.push_str(value),
                PathSegment::Placeholder(param) => {
                    let value = params
                        .get(param)
                        .and_then(|v| v.as_deref())
                        .ok_or_else(|| missing(param))?;
                    if value.is_empty() {
                        return Err(LinkError::EmptyPathValue {
                            route: route.name.clone(),
                            name: param.clone(),
                        });
                    }
                    url.push_str(&percent_encode(value));
                }
            }
        }
        if route.segments.is_empty() {
            url.push('/');
        }

        let placeholders: HashSet<&str> = route.placeholders().collect();
        let mut separator = '?';
        for parameter in &route.parameters {
            if placeholders.contains(parameter.name.as_str()) {
                continue;
            }
            match params.get(&parameter.name) {
                Some(value) => {
                    url.push(separator);
                    url.push_str(&parameter.name);
                    if let Some(value) = value {
                        url.push('=');
                        url.push_str(&percent_encode(value));
                    }
                    separator = '&';
                }
                None if parameter.mandatory => return Err(missing(&parameter.name)),
                None => {}
            }
        }

        Ok(url)
    }
}
