//! Typed client for the events REST API.
//!
//! [`ApiClient`] sends requests and re-validates every response against the
//! shared envelope and DTO assertions, resolving each call to an
//! [`ApiResponse`] rather than raising. [`EventsStore`] keeps a local view of
//! the event list on top of any [`EventsApi`] implementation and discards
//! fetch results that were superseded by a newer fetch.

pub mod api_client;
pub mod config;
pub mod endpoints;
pub mod response;
pub mod store;

pub use api_client::{ApiClient, ClientError};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use endpoints::EventsApi;
pub use response::{ApiFailure, ApiResponse};
pub use store::{EventsSnapshot, EventsStore, RefreshOutcome};
