//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteDeclaration[] + schemas + default hosts
//!     → template.rs (path template → literal/placeholder segments)
//!     → table.rs (resolve hosts, check parameters, keep declaration order)
//!     → Freeze as immutable RouteTable
//!
//! Incoming URL (raw string)
//!     → url.rs (decompose: schema, host, path segments, query)
//!     → matcher.rs (schema gate, then first route whose checks pass)
//!     → Return: Deeplink or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: literal comparison and positional placeholders only
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by declaration)

pub mod deeplink;
pub mod error;
pub mod matcher;
pub mod router;
pub mod table;
pub mod template;
pub mod url;
