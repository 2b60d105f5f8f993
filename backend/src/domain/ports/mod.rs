//! Domain ports for the hexagonal boundary.

mod event_repository;

#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
