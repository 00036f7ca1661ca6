//! Route registration and synchronous request dispatch.
//!
//! # Responsibilities
//! - Collect `get` / `post` routes before the server starts
//! - Dispatch a buffered request: static asset, matched route, or not-found
//! - Build the axum router with tracing, request-id, timeout and body-limit layers
//!
//! # Design Decisions
//! - Rejected registrations never raise; they are logged in dev mode only
//! - `into_router` consumes the app, so the route table is frozen from then on
//! - Handlers are synchronous and run on Tokio's blocking pool

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderName, Method, StatusCode},
    response::IntoResponse,
    Router,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EngineConfig;
use crate::http::request::{Request, UuidRequestId, X_REQUEST_ID};
use crate::http::response::{Response, ResponseContext};
use crate::routing::{RouteError, RouteTable};
use crate::statics::is_asset_path;

/// A route handler.
pub type Handler = Arc<dyn Fn(&mut Request, &mut Response) + Send + Sync>;

/// Immutable dispatch state shared by all requests.
pub struct Dispatcher {
    routes: RouteTable<Handler>,
    context: Arc<ResponseContext>,
}

impl Dispatcher {
    /// Process one request to completion.
    pub fn handle(&self, mut request: Request) -> Response {
        let mut response = Response::new(self.context.clone());

        if is_asset_path(&request.url) {
            self.serve_asset(&request, &mut response);
            return response;
        }

        match self.routes.dispatch(&request.method, &request.url) {
            Some(found) => {
                tracing::debug!(
                    request_id = request.request_id.as_deref().unwrap_or("unknown"),
                    method = %request.method,
                    path = %request.url,
                    route = %found.pattern,
                    "Route matched"
                );
                request.url = found.pattern.to_string();
                request.matches = found.params.into_iter().collect();
                (found.handler)(&mut request, &mut response);
            }
            None => {
                tracing::debug!(method = %request.method, path = %request.url, "No route matched");
                response.not_found(&request.method);
            }
        }
        response
    }

    fn serve_asset(&self, request: &Request, response: &mut Response) {
        if request.is_navigation() {
            tracing::warn!(path = %request.url, ip = %request.ip, "Direct navigation to asset denied");
            response.access_denied(&request.method);
            return;
        }

        match self.context.statics.resolve(&request.url) {
            Ok(asset) => {
                response.set_content_type(&asset.content_type());
                response.end_with(&asset.body);
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %request.url, error = %e, "Asset not found");
                response.not_found(&request.method);
            }
            Err(e) => response.server_error(&e),
        }
    }

    pub fn routes(&self) -> &RouteTable<Handler> {
        &self.routes
    }
}

/// Application under construction: configuration plus route table.
pub struct App {
    config: EngineConfig,
    dispatcher: Dispatcher,
}

impl App {
    pub fn new(config: EngineConfig) -> Self {
        let context = Arc::new(ResponseContext::from_config(&config));
        Self {
            config,
            dispatcher: Dispatcher {
                routes: RouteTable::new(),
                context,
            },
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register a GET route.
    pub fn get<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        self.route(Method::GET, pattern, handler)
    }

    /// Register a POST route.
    pub fn post<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        self.route(Method::POST, pattern, handler)
    }

    /// Register a route, dropping it (with a dev-mode warning) when rejected.
    pub fn route<F>(&mut self, method: Method, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        if let Err(e) = self.try_route(method, pattern, handler) {
            if self.config.environment.is_dev() {
                tracing::warn!(pattern = %pattern, error = %e, "Route registration rejected");
            }
        }
        self
    }

    /// Register a route, reporting why it was rejected.
    pub fn try_route<F>(&mut self, method: Method, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        self.dispatcher
            .routes
            .register(method, pattern, Arc::new(handler) as Handler)
    }

    pub fn routes(&self) -> &RouteTable<Handler> {
        self.dispatcher.routes()
    }

    /// Dispatch a request without going through HTTP.
    pub fn handle(&self, request: Request) -> Response {
        self.dispatcher.handle(request)
    }

    /// Freeze the routes and build the axum router.
    #[allow(deprecated)]
    pub fn into_router(self) -> Router {
        let limits = self.config.limits.clone();
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        tracing::debug!(routes = self.dispatcher.routes.len(), "Route table frozen");

        let state = AppState {
            dispatcher: Arc::new(self.dispatcher),
            max_body_size: limits.max_body_size,
        };

        Router::new()
            .fallback(handle_request)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(limits.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, UuidRequestId))
    }
}

/// State injected into the fallback handler.
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
    max_body_size: usize,
}

/// Buffer the request, then hand it to the dispatcher on the blocking pool.
async fn handle_request(State(state): State<AppState>, request: axum::extract::Request) -> axum::response::Response {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Failed to read request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let request = Request::from_parts(&parts, bytes, ip);
    let method = request.method.clone();
    let path = request.url.clone();

    let dispatcher = state.dispatcher.clone();
    match tokio::task::spawn_blocking(move || dispatcher.handle(request)).await {
        Ok(response) => response.into_http(),
        Err(e) => {
            tracing::error!(method = %method, path = %path, error = %e, "Handler panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
