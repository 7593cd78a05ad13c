//! Deeplink routing library.
//!
//! Compiles an ordered set of route declarations into an immutable table and
//! classifies URLs into named deeplinks with bound parameters.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::DeeplinkConfig;
pub use routing::deeplink::Deeplink;
pub use routing::error::{ConfigurationError, LinkError};
pub use routing::matcher::{match_url, Bindings, MatchResult};
pub use routing::router::{DeeplinkRouter, SharedRouter};
pub use routing::table::{Parameter, Route, RouteDeclaration, RouteTable};
pub use routing::template::PathSegment;
pub use routing::url::{decompose, ParseFailure, ParsedUrl};
