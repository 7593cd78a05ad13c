//! Route matching logic.
//!
//! # Responsibilities
//! - Check the URL schema once against the table (global gate)
//! - Match host against the route's effective host set (case-insensitive)
//! - Match path segments pairwise (literals case-sensitive, placeholders bind)
//! - Resolve the remaining parameters from the query string
//!
//! # Design Decisions
//! - Segment counts are compared before any literal, so wrong-length URLs fail in O(1)
//! - First match wins; there is no "most specific route" search
//! - A missing mandatory parameter skips the route, the scan continues
//! - Optional parameters that are absent are bound to `None`

use std::collections::BTreeMap;

use crate::routing::deeplink::Deeplink;
use crate::routing::table::{Route, RouteTable};
use crate::routing::template::PathSegment;
use crate::routing::url::ParsedUrl;

/// Parameter name to resolved value. `None` means "no value" (absent optional
/// parameter, or a query key given without `=`).
pub type Bindings = BTreeMap<String, Option<String>>;

/// Trait for matching decomposed URLs against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the URL satisfies this condition.
    fn matches(&self, url: &ParsedUrl) -> bool;
}

/// Matches the URL host against a set of allowed hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostMatcher {
    hosts: Vec<String>,
}

impl HostMatcher {
    /// Create a new host matcher.
    /// Hosts are normalized to lowercase; duplicates are dropped, order is kept.
    pub fn new<I>(hosts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            hosts: normalized(hosts),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, url: &ParsedUrl) -> bool {
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(&url.host))
    }
}

/// Matches the URL scheme against the table's accepted schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMatcher {
    schemas: Vec<String>,
}

impl SchemaMatcher {
    pub fn new<I>(schemas: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            schemas: normalized(schemas),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.schemas
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Matcher for SchemaMatcher {
    fn matches(&self, url: &ParsedUrl) -> bool {
        self.schemas.iter().any(|s| s.eq_ignore_ascii_case(&url.schema))
    }
}

fn normalized<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into().to_lowercase();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Outcome of matching one URL against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched(Deeplink),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn into_deeplink(self) -> Option<Deeplink> {
        match self {
            MatchResult::Matched(deeplink) => Some(deeplink),
            MatchResult::NoMatch => None,
        }
    }
}

impl From<MatchResult> for Option<Deeplink> {
    fn from(result: MatchResult) -> Self {
        result.into_deeplink()
    }
}

/// Find the first route in `table` that matches `url`.
pub fn match_url(table: &RouteTable, url: &ParsedUrl) -> MatchResult {
    if !table.schemas().matches(url) {
        tracing::trace!(schema = %url.schema, "Schema not accepted");
        return MatchResult::NoMatch;
    }

    for route in table.routes() {
        if let Some(parameters) = route.bind(url) {
            tracing::debug!(route = %route.name(), host = %url.host, "Deeplink matched");
            return MatchResult::Matched(Deeplink::new(route.name(), parameters));
        }
    }

    tracing::debug!(host = %url.host, segments = url.path_segments.len(), "No route matched");
    MatchResult::NoMatch
}

impl Route {
    /// Try this route alone against `url`, ignoring the table schema gate.
    ///
    /// Returns the bindings when host, path and mandatory parameters all line up.
    pub fn bind(&self, url: &ParsedUrl) -> Option<Bindings> {
        if !self.hosts.matches(url) {
            return None;
        }
        if self.segments.len() != url.path_segments.len() {
            return None;
        }

        let mut bindings = Bindings::new();
        for (segment, value) in self.segments.iter().zip(&url.path_segments) {
            match segment {
                PathSegment::Literal(literal) => {
                    if literal != value {
                        tracing::trace!(route = %self.name, literal = %literal, value = %value, "Literal mismatch");
                        return None;
                    }
                }
                PathSegment::Placeholder(name) => {
                    bindings.insert(name.clone(), Some(value.clone()));
                }
            }
        }

        for parameter in &self.parameters {
            if bindings.contains_key(&parameter.name) {
                continue;
            }
            match url.query_parameters.get(&parameter.name) {
                Some(value) => {
                    bindings.insert(parameter.name.clone(), value.clone());
                }
                None if parameter.mandatory => {
                    tracing::trace!(route = %self.name, parameter = %parameter.name, "Mandatory parameter missing");
                    return None;
                }
                None => {
                    bindings.insert(parameter.name.clone(), None);
                }
            }
        }

        Some(bindings)
    }
}
