//! HTTP server configuration object and helpers.

use events_backend::outbound::persistence::DbPool;
use std::net::SocketAddr;
use url::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) frontend_url: Option<Url>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            frontend_url: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, events are stored in PostgreSQL; otherwise they live
    /// in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Restrict cross-origin callers to `frontend_url`'s origin.
    #[must_use]
    pub fn with_frontend_url(mut self, frontend_url: Option<Url>) -> Self {
        self.frontend_url = frontend_url;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
