//! Health endpoints: liveness & readiness probes for orchestration and load balancers.
//!
//! Probe bodies use the same envelopes as the events API.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{get, web};
use serde::Serialize;

use super::envelope::Envelope;
use super::error::{ApiResult, HttpException};

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready once the store is reachable.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes while draining.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether readiness probes pass.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether liveness probes pass.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Probe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ProbeStatus {
    #[schema(example = "ready")]
    pub status: &'static str,
}

fn probe(ok: bool, status: &'static str, unavailable: &str) -> ApiResult<Envelope<ProbeStatus>> {
    if ok {
        Ok(Envelope::ok(ProbeStatus { status }).no_store())
    } else {
        Err(HttpException::service_unavailable(unavailable).into())
    }
}

/// Readiness probe. 200 once the store is initialised, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = crate::inbound::http::schemas::ProbeEnvelopeSchema),
        (status = 503, description = "Server is not ready", body = crate::inbound::http::schemas::ApiErrorResponseSchema)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> ApiResult<Envelope<ProbeStatus>> {
    probe(state.is_ready(), "ready", "Server is not ready")
}

/// Liveness probe. 200 while the process is alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive", body = crate::inbound::http::schemas::ProbeEnvelopeSchema),
        (status = 503, description = "Server is shutting down", body = crate::inbound::http::schemas::ApiErrorResponseSchema)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> ApiResult<Envelope<ProbeStatus>> {
    probe(state.is_alive(), "alive", "Server is shutting down")
}
