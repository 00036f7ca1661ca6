//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable via `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, human-readable format for development
//! - Dev mode defaults to debug so registration warnings are visible

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, ObservabilityConfig};

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(environment: Environment, config: &ObservabilityConfig) -> String {
    let level = if environment.is_dev() && config.log_level == "info" {
        "debug"
    } else {
        config.log_level.as_str()
    };
    format!("undev_engine={level},tower_http={level}")
}

/// Install the global tracing subscriber.
pub fn init(environment: Environment, config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(environment, config).into());
    let json = config.json.unwrap_or(!environment.is_dev());

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {e}");
    }
}
