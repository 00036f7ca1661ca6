//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the engine.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the web engine.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Runtime environment (`dev` or `prod`).
    pub environment: Environment,

    /// Listener host and port.
    pub server: ServerConfig,

    /// Certificate and key locations (PEM).
    pub tls: TlsConfig,

    /// Static and template directories.
    pub assets: AssetsConfig,

    /// Stylesheets and scripts injected by `<use-plugins>`.
    pub plugins: PluginConfig,

    /// Request limits and timeouts.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Runtime environment.
///
/// Anything other than a case-insensitive `dev` resolves to `Prod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Environment {
    Dev,
    #[default]
    Prod,
}

impl Environment {
    /// Parse an environment name, falling back to `Prod`.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dev") {
            Environment::Dev
        } else {
            Environment::Prod
        }
    }

    pub fn is_dev(self) -> bool {
        self == Environment::Dev
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.as_str().to_string()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or IP address to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: Option<String>,

    /// Path to private key file (PEM).
    pub key_path: Option<String>,
}

/// Asset directories.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Base directory for static files (css, js, images, ...).
    pub static_root: String,

    /// Base directory for `.ehtml` templates and their includes.
    pub template_root: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_root: "public".to_string(),
            template_root: ".".to_string(),
        }
    }
}

/// Plugin assets linked into pages that declare `<use-plugins>`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Stylesheet URLs.
    pub stylesheets: Vec<String>,

    /// Script URLs.
    pub scripts: Vec<String>,
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Grace period for in-flight requests on shutdown.
    pub shutdown_grace_secs: u64,

    /// Maximum nesting of `<include>` directives.
    pub max_include_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            request_timeout_secs: 30,
            shutdown_grace_secs: 10,
            max_include_depth: 16,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Force JSON output on or off. Defaults to JSON in prod only.
    pub json: Option<bool>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: None,
        }
    }
}
