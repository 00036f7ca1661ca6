//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EngineConfig (validated, immutable)
//!     → handed to the App / Server at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table is built from code
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Unknown environment names fall back to `prod`

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AssetsConfig, EngineConfig, Environment, LimitsConfig, ObservabilityConfig, PluginConfig,
    ServerConfig, TlsConfig,
};
pub use validation::{validate_config, ValidationError};
