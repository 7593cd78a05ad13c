//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Own the compiled route table
//! - Resolve raw URL strings to a deeplink or an explicit no-match
//! - Publish rebuilt tables to concurrent readers
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Unparseable URLs degrade to `None`; resolving never fails
//! - Reloads replace the whole table through an atomic pointer swap, readers
//!   keep the snapshot they loaded

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::DeeplinkConfig;
use crate::routing::deeplink::Deeplink;
use crate::routing::error::{ConfigurationResult, LinkError};
use crate::routing::matcher::{match_url, Bindings, Matcher};
use crate::routing::table::RouteTable;
use crate::routing::url::decompose;

/// Resolves URLs against one immutable route table.
#[derive(Debug, Clone)]
pub struct DeeplinkRouter {
    table: Arc<RouteTable>,
}

impl DeeplinkRouter {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Build the route table described by a loaded configuration.
    pub fn from_config(config: &DeeplinkConfig) -> ConfigurationResult<Self> {
        config.build_table().map(Self::new)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a raw URL. `None` means no deeplink matched, including when the
    /// string is not a valid URL.
    pub fn resolve(&self, url: &str) -> Option<Deeplink> {
        match decompose(url) {
            Ok(parsed) => match_url(&self.table, &parsed).into_deeplink(),
            Err(e) => {
                tracing::debug!(url, error = %e, "Unparseable deeplink URL");
                None
            }
        }
    }

    /// Resolve a raw URL against a single named route.
    ///
    /// The table schema check still applies; route precedence does not.
    pub fn resolve_route(&self, route: &str, url: &str) -> Option<Deeplink> {
        let route = self.table.route(route)?;
        let parsed = decompose(url).ok()?;
        if !self.table.schemas().matches(&parsed) {
            return None;
        }
        route
            .bind(&parsed)
            .map(|parameters| Deeplink::new(route.name(), parameters))
    }

    /// Build a concrete URL for a route. See [`RouteTable::url_for`].
    pub fn url_for(&self, route: &str, params: &Bindings) -> Result<String, LinkError> {
        self.table.url_for(route, params)
    }
}

/// A router whose table can be replaced while other threads keep resolving.
#[derive(Debug)]
pub struct SharedRouter {
    current: ArcSwap<RouteTable>,
}

impl SharedRouter {
    pub fn new(table: RouteTable) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// Snapshot of the router as currently published.
    pub fn load(&self) -> DeeplinkRouter {
        DeeplinkRouter {
            table: self.current.load_full(),
        }
    }

    /// Publish a new table. In-flight resolutions finish on the old one.
    pub fn replace(&self, table: RouteTable) {
        let routes = table.len();
        self.current.store(Arc::new(table));
        tracing::info!(routes, "Route table replaced");
    }

    pub fn resolve(&self, url: &str) -> Option<Deeplink> {
        self.load().resolve(url)
    }
}

impl From<DeeplinkRouter> for SharedRouter {
    fn from(router: DeeplinkRouter) -> Self {
        Self {
            current: ArcSwap::new(router.table),
        }
    }
}
