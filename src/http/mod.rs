//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection (axum-server + rustls)
//!     → server.rs (listener, graceful shutdown)
//!     → app.rs (layers: request id, trace, timeout; body buffering)
//!     → request.rs (Request: method, url, headers, body, ip)
//!     → app.rs Dispatcher
//!         ├─ path contains '.'  → statics (navigation check, file read)
//!         ├─ route matched      → handler(&mut Request, &mut Response)
//!         └─ otherwise          → not-found reply
//!     → response.rs (into axum response)
//!     → Send to client
//! ```

pub mod app;
pub mod request;
pub mod response;
pub mod server;

pub use app::{App, Dispatcher, Handler};
pub use request::{Request, UuidRequestId, X_REQUEST_ID};
pub use response::{Response, ResponseContext, ACCESS_DENIED_HTML, NOT_FOUND_HTML};
pub use server::{Server, ServerBuilder, ServerError};
