//! # CMS API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::HttpServer;
use anyhow::Context;

use api_server::telemetry::{TelemetryConfig, init_telemetry};
use api_server::{AppConfig, AppContext, build_app};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_telemetry(&TelemetryConfig::new(config.json_logs));

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Refusing to start with unsafe configuration");
        return Err(e.into());
    }

    tracing::info!(
        host = %config.host,
        port = config.port,
        mode = ?config.mode,
        "Starting CMS API server"
    );

    let ctx = AppContext::from_config(&config).await;

    let worker_ctx = ctx.clone();
    HttpServer::new(move || build_app(worker_ctx.clone()))
        .shutdown_timeout(config.shutdown_timeout.as_secs())
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    // In-flight requests have drained; release the pool.
    #[cfg(feature = "postgres")]
    if let Some(db) = &ctx.db {
        if let Err(e) = db.close().await {
            tracing::error!(error = %e, "Failed to close database pool");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
