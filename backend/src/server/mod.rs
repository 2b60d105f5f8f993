//! Server construction and repository wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use events_backend::domain::ports::EventRepository;
use events_backend::inbound::http::app::build_app;
use events_backend::inbound::http::cors::cors_policy;
use events_backend::inbound::http::health::HealthState;
use events_backend::inbound::http::state::HttpState;
use events_backend::outbound::memory::InMemoryEventRepository;
use events_backend::outbound::persistence::DieselEventRepository;

/// Pick the repository adapter: PostgreSQL when a pool is configured,
/// process memory otherwise.
fn build_repository(config: &ServerConfig) -> Arc<dyn EventRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselEventRepository::new(pool.clone())),
        None => {
            info!("no database configured; events are kept in memory");
            Arc::new(InMemoryEventRepository::new())
        }
    }
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(HttpState::new(build_repository(&config)));
    let bind_addr = config.bind_addr();
    let frontend_url = config.frontend_url.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
            .wrap(cors_policy(frontend_url.as_ref()))
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
