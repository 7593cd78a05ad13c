//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (route table build, reloads, match decisions)
//!     → logging.rs subscriber (stderr, compact/pretty/json)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Matching only logs at debug/trace, so resolving stays quiet by default

pub mod logging;
