//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, port non-zero)
//! - Reject empty paths and plugin URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EngineConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::EngineConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &EngineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::new("server.host", "must not be empty"));
    }
    if config.server.port == 0 {
        errors.push(ValidationError::new("server.port", "must be non-zero"));
    }

    if config.assets.static_root.trim().is_empty() {
        errors.push(ValidationError::new("assets.static_root", "must not be empty"));
    }
    if config.assets.template_root.trim().is_empty() {
        errors.push(ValidationError::new("assets.template_root", "must not be empty"));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::new("limits.max_body_size", "must be greater than 0"));
    }
    if config.limits.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "limits.request_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.limits.max_include_depth == 0 {
        errors.push(ValidationError::new(
            "limits.max_include_depth",
            "must be greater than 0",
        ));
    }

    for url in &config.plugins.stylesheets {
        if url.trim().is_empty() {
            errors.push(ValidationError::new("plugins.stylesheets", "contains an empty URL"));
        }
    }
    for url in &config.plugins.scripts {
        if url.trim().is_empty() {
            errors.push(ValidationError::new("plugins.scripts", "contains an empty URL"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
