//! Domain primitives, use-cases and ports.
//!
//! Purpose: hold the event aggregate and the service that validates payloads
//! against the shared DTO schemas before anything reaches storage. Adapters
//! depend on this module; it depends on no adapter.
//!
//! Public surface:
//! - Event, NewEvent, EventChanges: the aggregate and its write shapes.
//! - EventsService: create/find/update/remove use-cases.
//! - Error: transport-agnostic failure type.

pub mod error;
pub mod event;
pub mod events_service;
pub mod ports;

pub use self::error::Error;
pub use self::event::{Event, EventChanges, NewEvent};
pub use self::events_service::EventsService;
