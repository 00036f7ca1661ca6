//! UndevEngine demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────┐
//!                   │                   UNDEV ENGINE                   │
//!                   │                                                  │
//!  HTTPS request    │  ┌─────────┐   ┌─────────┐   ┌──────────────┐    │
//!  ─────────────────┼─▶│   net   │──▶│  http   │──▶│   routing    │    │
//!                   │  │ rustls  │   │ app     │   │ [:name] match│    │
//!                   │  └─────────┘   └────┬────┘   └──────┬───────┘    │
//!                   │                     │               │            │
//!                   │                     ▼               ▼            │
//!                   │               ┌──────────┐   ┌──────────────┐    │
//!                   │               │ statics  │   │   handler    │    │
//!                   │               │ mime/read│   │ render/write │    │
//!                   │               └──────────┘   └──────┬───────┘    │
//!                   │                                     ▼            │
//!  HTTPS response   │                              ┌──────────────┐    │
//!  ◀────────────────┼──────────────────────────────│   template   │    │
//!                   │                              │   .ehtml     │    │
//!                   │                              └──────────────┘    │
//!                   └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use serde_json::json;

use undev_engine::config::{load_config, EngineConfig, Environment};
use undev_engine::http::Server;
use undev_engine::net::read_pem_files;
use undev_engine::observability::logging;

#[derive(Parser)]
#[command(name = "undev-engine")]
#[command(about = "Demo HTTPS server built on UndevEngine", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the environment (`dev` or `prod`).
    #[arg(short, long)]
    env: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(env) = &cli.env {
        config.environment = Environment::parse(env);
    }

    logging::init(config.environment, &config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "undev-engine starting"
    );

    let (cert_path, key_path) = match (&config.tls.cert_path, &config.tls.key_path) {
        (Some(cert), Some(key)) => (PathBuf::from(cert), PathBuf::from(key)),
        _ => {
            tracing::error!("tls.cert_path and tls.key_path must both be configured");
            return Err("missing TLS configuration".into());
        }
    };
    let (cert, key) = read_pem_files(&cert_path, &key_path)?;

    let mut server = Server::builder(config).key(key).cert(cert).build()?;

    server
        .get("/", |_req, res| {
            if let Err(e) = res.render("index.ehtml", [("test", "tested")]) {
                tracing::warn!(template = "index.ehtml", error = %e, "Home page render failed");
            }
            res.end();
        })
        .get("/users/[:id]", |req, res| {
            res.json(&json!({
                "ok": true,
                "id": req.param("id"),
                "ip": req.ip.to_string(),
            }));
        })
        .post("/echo", |req, res| {
            res.json(&json!({
                "ok": true,
                "body": req.body_str(),
            }));
        });

    server.listen().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
