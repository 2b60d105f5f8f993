//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the `EventRepository` implementation backed by PostgreSQL via
//! `diesel-async` and `bb8` pooling, plus the embedded schema migrations.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! internal; only domain types cross the port.
//!
//! # Example
//!
//! ```ignore
//! use events_backend::outbound::persistence::{DbPool, DieselEventRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/events")).await?;
//! let repo = DieselEventRepository::new(pool);
//! ```

mod diesel_event_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
