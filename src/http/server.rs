//! HTTPS server setup.
//!
//! # Responsibilities
//! - Require TLS key and certificate before a server exists
//! - Expose route registration until `listen`
//! - Resolve the configured host, bind with rustls and serve the app
//! - Drain in-flight requests on shutdown
//!
//! # Design Decisions
//! - `build()` fails (and logs) instead of returning a half-configured server
//! - `listen` consumes the server: no route changes after it starts

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::http::app::App;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::lifecycle::{signals, Shutdown};
use crate::net::tls::{rustls_config, validate_pem, TlsError};

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("TLS private key is missing")]
    MissingKey,

    #[error("TLS certificate is missing")]
    MissingCert,

    #[error("invalid TLS material: {0}")]
    Tls(#[from] TlsError),

    #[error("could not resolve listen address {host}:{port}")]
    Resolve { host: String, port: u16 },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Collects TLS material before the server is created.
pub struct ServerBuilder {
    config: EngineConfig,
    key: Option<Vec<u8>>,
    cert: Option<Vec<u8>>,
}

impl ServerBuilder {
    /// Private key (PEM bytes).
    pub fn key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Certificate chain (PEM bytes).
    pub fn cert(mut self, cert: impl Into<Vec<u8>>) -> Self {
        self.cert = Some(cert.into());
        self
    }

    /// Validate the TLS material and create the server.
    pub fn build(self) -> Result<Server, ServerError> {
        let result = self.try_build();
        if let Err(e) = &result {
            tracing::error!(error = %e, "Server instantiation failed");
        }
        result
    }

    fn try_build(self) -> Result<Server, ServerError> {
        let key = self.key.filter(|k| !k.is_empty()).ok_or(ServerError::MissingKey)?;
        let cert = self.cert.filter(|c| !c.is_empty()).ok_or(ServerError::MissingCert)?;
        validate_pem(&cert, &key)?;

        Ok(Server {
            app: App::new(self.config),
            cert,
            key,
        })
    }
}

/// An HTTPS server with its routes.
pub struct Server {
    app: App,
    cert: Vec<u8>,
    key: Vec<u8>,
}

impl Server {
    pub fn builder(config: EngineConfig) -> ServerBuilder {
        ServerBuilder {
            config,
            key: None,
            cert: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.app.config()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Register a GET route.
    pub fn get<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        self.app.get(pattern, handler);
        self
    }

    /// Register a POST route.
    pub fn post<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        self.app.post(pattern, handler);
        self
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn listen(self) -> Result<(), ServerError> {
        let shutdown = Shutdown::new();
        signals::forward_signals(&shutdown);
        self.listen_with_shutdown(shutdown).await
    }

    /// Serve until `shutdown` is triggered.
    pub async fn listen_with_shutdown(self, shutdown: Shutdown) -> Result<(), ServerError> {
        let config = self.app.config().clone();
        let addr = resolve_addr(&config.server.host, config.server.port).await?;
        let tls = rustls_config(self.cert, self.key).await?;
        let grace = Duration::from_secs(config.limits.shutdown_grace_secs);

        tracing::info!(
            address = %addr,
            environment = %config.environment,
            routes = self.app.routes().len(),
            "HTTPS server starting"
        );

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown.wait().await;
            tracing::info!(grace_secs = grace.as_secs(), "Draining connections");
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        let app = self.app.into_router().into_make_service_with_connect_info::<SocketAddr>();
        axum_server::bind_rustls(addr, tls).handle(handle).serve(app).await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

async fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    tokio::net::lookup_host((host, port))
        .await?
        .next()
        .ok_or_else(|| ServerError::Resolve {
            host: host.to_string(),
            port,
        })
}
