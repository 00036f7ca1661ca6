//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4)
//! - Convert the buffered HTTP request into the handler-facing `Request`
//! - Expose client address, raw body and captured path parameters
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body is buffered completely before dispatch
//! - `url` holds the path only; the query string is kept separately

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

use axum::body::Bytes;
use axum::http::{request::Parts, HeaderMap, HeaderValue, Method};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::statics::is_browser_navigation;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 for every request lacking an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// An incoming request as seen by route handlers.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Request path. Rewritten to the matched route pattern on dispatch.
    pub url: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    /// Raw body bytes, present only when non-empty.
    pub body: Option<Bytes>,
    /// Client address.
    pub ip: IpAddr,
    /// Values captured by `[:name]` placeholders.
    pub matches: HashMap<String, String>,
    pub request_id: Option<String>,
}

impl Request {
    /// Create a request for `uri` (path with optional query).
    pub fn new(method: Method, uri: &str) -> Self {
        let (url, query) = match uri.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (uri.to_string(), None),
        };

        Self {
            method,
            url,
            query,
            headers: HeaderMap::new(),
            body: None,
            ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            matches: HashMap::new(),
            request_id: None,
        }
    }

    /// Build from the head of an HTTP request and its buffered body.
    pub fn from_parts(parts: &Parts, body: Bytes, ip: IpAddr) -> Self {
        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            method: parts.method.clone(),
            url: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers.clone(),
            body: (!body.is_empty()).then_some(body),
            ip,
            matches: HashMap::new(),
            request_id,
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip = ip;
        self
    }

    /// The body as text, if present and valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        let body = self.body.as_ref()?;
        match std::str::from_utf8(body) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(path = %self.url, error = %e, "Request body is not UTF-8");
                None
            }
        }
    }

    /// A captured path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.matches.get(name).map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Whether the browser is navigating to this URL directly.
    pub fn is_navigation(&self) -> bool {
        is_browser_navigation(&self.headers)
    }
}
