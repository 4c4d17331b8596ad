use actix_web::{web, HttpServer};
use anyhow::Context;
use std::time::Duration;
use tracing::{info, warn};

use ks_api::{create_app, telemetry, AppState};
use ks_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // A missing signing secret stops the process here
    let config = AppConfig::load().context("Failed to load configuration")?;

    telemetry::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    info!(environment = ?config.environment, "Starting Keystone API Server");

    if config.auth.jwt.is_weak_secret() {
        warn!("JWT signing secret is shorter than 32 bytes; use a longer random value");
    }

    info!(backend = ?config.store.backend, url = %config.store.masked_url(), "Connecting to document store");
    let store = ks_infra::connect(&config.store, &config.retry.connect)
        .await
        .context("Failed to initialize document store")?;

    let state = web::Data::new(
        AppState::new(&config, store).context("Failed to initialize services")?,
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
