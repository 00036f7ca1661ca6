//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! cert/key (PEM bytes from disk or caller)
//!     → tls.rs (validate, build rustls config)
//!     → axum-server HTTPS listener (http/server.rs)
//! ```
//!
//! # Design Decisions
//! - HTTPS only: a server cannot be built without key and certificate
//! - PEM material is validated when the server is built, not on first accept

pub mod tls;

pub use tls::{read_pem_files, rustls_config, validate_pem, TlsError};
