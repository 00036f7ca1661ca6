//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → tower-http TraceLayer spans per request (with x-request-id)
//!
//! Consumers:
//!     → stdout (pretty in dev, JSON in prod)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the request-id layer into handler logs
//! - Registration problems are only logged in dev mode

pub mod logging;
