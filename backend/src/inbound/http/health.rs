//! Liveness and readiness probes.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, web};
use serde_json::json;

/// Shared probe flags for the running process.
///
/// Readiness flips on once the listener is bound; liveness stays green until
/// the process is told to drain, at which point both probes go red.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
    draining: AtomicBool,
}

impl HealthState {
    /// Fresh state: live, not yet ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service ready to receive traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Mark the service as shutting down.
    pub fn mark_draining(&self) {
        self.draining.store(true, Ordering::Release);
    }

    /// Whether the process should keep running.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.draining.load(Ordering::Acquire)
    }

    /// Whether the process should receive traffic.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire) && self.is_live()
    }
}

// Probe responses must never be cached by intermediaries.
fn probe_response(ok: bool) -> HttpResponse {
    let mut builder = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header(("Cache-Control", "no-store"))
        .json(json!({ "status": if ok { "ok" } else { "unavailable" } }))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Process is live"),
        (status = 503, description = "Process is draining"),
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_live())
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Process is serving traffic"),
        (status = 503, description = "Process is starting or draining"),
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}
