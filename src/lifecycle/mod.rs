//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging → Read TLS material → Build server
//!     → Register routes → Listen
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Routes are registered before listen; the table is frozen afterwards
//! - Shutdown has a grace period: in-flight requests are cut off after it

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
