//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the events use-cases and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EventsService;
use crate::domain::ports::EventRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub events: EventsService,
}

impl HttpState {
    /// Build state over the given repository adapter.
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self {
            events: EventsService::new(repository),
        }
    }
}
