//! Template subsystem (`.ehtml`).
//!
//! # Data Flow
//! ```text
//! render(path, vars)
//!     → engine.rs (extension check, file load)
//!     → lexer.rs (one pass: text / set / include / use-plugins / placeholder)
//!     → engine.rs (include expansion with cycle guard, set collection,
//!                  case-insensitive substitution)
//!     → Rendered { body, use_plugins }
//!     → plugins.rs (asset tags, only when use_plugins)
//! ```
//!
//! # Design Decisions
//! - Directive names are reserved and never usable as variables
//! - Self-referential includes are an error, not unbounded output
//! - Templates are re-read on every render (no caching)

pub mod engine;
pub mod lexer;
pub mod plugins;

pub use engine::{has_template_extension, Rendered, TemplateEngine, TemplateError};
pub use plugins::PluginAssets;

/// File extension accepted by [`TemplateEngine::render`].
pub const TEMPLATE_EXTENSION: &str = "ehtml";

/// Names consumed by directives; caller variables with these keys are dropped.
pub const RESERVED_NAMES: [&str; 3] = ["set", "use-plugins", "include"];
