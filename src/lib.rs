//! Minimal HTTPS web engine: route registration with `[:name]` path
//! placeholders, static asset serving and `.ehtml` templates.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod statics;
pub mod template;

pub use config::{EngineConfig, Environment};
pub use http::{App, Request, Response, Server};
pub use lifecycle::Shutdown;
