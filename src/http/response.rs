//! Response building.
//!
//! # Responsibilities
//! - Accumulate status, headers and body written by handlers
//! - Serve static files and rendered templates into the body
//! - Produce the framework's not-found / access-denied replies
//! - Convert into an axum response once the handler returns
//!
//! # Design Decisions
//! - Writes after `end()` are dropped, not appended
//! - Error replies always replace whatever the handler wrote
//! - GET errors are HTML fragments, other methods get JSON

use std::fmt::Display;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::Serialize;

use crate::config::{EngineConfig, Environment};
use crate::statics::{StaticError, StaticResolver};
use crate::template::{PluginAssets, TemplateEngine, TemplateError};

/// Body returned for unknown GET routes.
pub const NOT_FOUND_HTML: &str = "<b>Ошибка! Маршрут не найден!</b>";
/// Body returned for direct GET navigation to assets.
pub const ACCESS_DENIED_HTML: &str = "<b>Access denied</b>";

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";

#[derive(Serialize)]
struct NotFoundBody {
    ok: bool,
    code: u16,
    message: &'static str,
}

#[derive(Serialize)]
struct AccessDeniedBody {
    ok: bool,
    status: u16,
    message: &'static str,
}

/// Services shared by every response.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub environment: Environment,
    pub statics: StaticResolver,
    pub templates: TemplateEngine,
    pub plugins: PluginAssets,
}

impl ResponseContext {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            environment: config.environment,
            statics: StaticResolver::new(&config.assets.static_root),
            templates: TemplateEngine::new(&config.assets.template_root)
                .with_max_include_depth(config.limits.max_include_depth),
            plugins: PluginAssets::from_config(&config.plugins),
        }
    }
}

/// An outgoing response, written incrementally by a handler.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    ended: bool,
    ctx: Arc<ResponseContext>,
}

impl Response {
    pub fn new(ctx: Arc<ResponseContext>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
            ended: false,
            ctx,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a header. Values that are not valid header text are skipped.
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> &mut Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(_) => tracing::warn!(header = %name, "Invalid header value ignored"),
        }
        self
    }

    pub fn set_content_type(&mut self, content_type: &str) -> &mut Self {
        self.set_header(header::CONTENT_TYPE, content_type)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Append to the body.
    pub fn write(&mut self, chunk: impl AsRef<[u8]>) -> &mut Self {
        if self.ended {
            tracing::debug!("Write after end ignored");
        } else {
            self.body.extend_from_slice(chunk.as_ref());
        }
        self
    }

    /// Finish the response. Later writes are ignored.
    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn end_with(&mut self, chunk: impl AsRef<[u8]>) {
        self.write(chunk);
        self.end();
    }

    /// Replace the body with `value` as JSON and end the response.
    pub fn json<T: Serialize>(&mut self, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.body = bytes;
                self.set_content_type(JSON);
                self.end();
            }
            Err(e) => self.server_error(&e),
        }
    }

    /// Serve `name` from the static root.
    pub fn send_file(&mut self, name: &str) -> Result<(), StaticError> {
        match self.ctx.statics.resolve(name) {
            Ok(asset) => {
                self.set_content_type(&asset.content_type());
                self.write(&asset.body);
                Ok(())
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(file = %name, error = %e, "Static file not found");
                    self.replace(StatusCode::NOT_FOUND, "text/plain; charset=utf-8", b"Not Found");
                } else {
                    self.server_error(&e);
                }
                Err(e)
            }
        }
    }

    /// Render an `.ehtml` template into the body.
    ///
    /// On failure the response becomes a 500 and the error is returned.
    pub fn render<I, K, V>(&mut self, path: &str, vars: I) -> Result<(), TemplateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        match self.ctx.templates.render(path, vars) {
            Ok(rendered) => {
                let body = if rendered.use_plugins {
                    self.ctx.plugins.inject(&rendered.body)
                } else {
                    rendered.body
                };
                self.set_content_type(HTML);
                self.write(body);
                Ok(())
            }
            Err(e) => {
                self.server_error(&e);
                Err(e)
            }
        }
    }

    /// Route-not-found reply.
    pub fn not_found(&mut self, method: &Method) {
        if method == Method::GET {
            self.replace(StatusCode::NOT_FOUND, HTML, NOT_FOUND_HTML.as_bytes());
        } else {
            self.status = StatusCode::NOT_FOUND;
            self.json(&NotFoundBody {
                ok: false,
                code: 404,
                message: "Маршрут не найден",
            });
        }
    }

    /// Reply for direct browser navigation to an asset.
    pub fn access_denied(&mut self, method: &Method) {
        if method == Method::GET {
            self.replace(StatusCode::METHOD_NOT_ALLOWED, HTML, ACCESS_DENIED_HTML.as_bytes());
        } else {
            self.status = StatusCode::METHOD_NOT_ALLOWED;
            self.json(&AccessDeniedBody {
                ok: false,
                status: 405,
                message: "Доступ запрещён!",
            });
        }
    }

    /// 500 reply. The error text is only exposed in dev mode.
    pub fn server_error(&mut self, error: &dyn Display) {
        tracing::error!(error = %error, "Request failed");
        let body = if self.ctx.environment.is_dev() {
            format!("<b>Internal Server Error</b><pre>{error}</pre>")
        } else {
            "<b>Internal Server Error</b>".to_string()
        };
        self.replace(StatusCode::INTERNAL_SERVER_ERROR, HTML, body.as_bytes());
    }

    fn replace(&mut self, status: StatusCode, content_type: &str, body: &[u8]) {
        self.status = status;
        self.set_content_type(content_type);
        self.body = body.to_vec();
        self.ended = true;
    }

    /// Convert into the wire response.
    pub fn into_http(mut self) -> axum::response::Response {
        if !self.body.is_empty() && !self.headers.contains_key(header::CONTENT_TYPE) {
            self.headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(HTML));
        }

        let mut response = axum::response::Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
