//! Backend entry-point: loads configuration, prepares storage and serves the
//! events API.

mod server;

use actix_web::web;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use events_backend::config::AppConfig;
use events_backend::inbound::http::health::HealthState;
use events_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppConfig::load_settings().map_err(|e| {
        error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;

    let mut config =
        ServerConfig::new(settings.bind_addr).with_frontend_url(settings.frontend_url.clone());
    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;

    info!(
        environment = settings.environment.as_str(),
        bind_addr = %settings.bind_addr,
        frontend_url = settings.frontend_url.as_ref().map(url::Url::as_str),
        "events backend listening"
    );
    server.await
}
