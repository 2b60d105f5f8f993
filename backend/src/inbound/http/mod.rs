//! HTTP inbound adapter exposing the events REST endpoints.

pub mod app;
pub mod cors;
pub mod envelope;
pub mod error;
pub mod events;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
