//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (segment matching, placeholder capture)
//!     → Return: RouteMatch (handler, canonical pattern, params) or NoMatch
//!
//! Route Registration (before listen):
//!     get/post(pattern, handler)
//!     → matcher.rs compiles the pattern
//!     → router.rs rejects duplicates, appends
//!     → Freeze as immutable table when the server starts
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (insertion order)

use axum::http::Method;
use thiserror::Error;

pub mod matcher;
pub mod router;

pub use matcher::{RoutePattern, Segment};
pub use router::{Route, RouteMatch, RouteTable};

/// Reasons a route registration is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Pattern is empty or whitespace.
    #[error("route pattern must be a non-empty string")]
    EmptyPattern,

    /// A `[:...]` segment has no usable name.
    #[error("invalid placeholder segment: {0}")]
    InvalidPlaceholder(String),

    /// The (method, pattern) pair is already registered.
    #[error("route {method} {pattern} is already registered")]
    Duplicate { method: Method, pattern: String },
}
