//! Liveness and readiness probe.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Instant;

use crate::api::dto::health::{HealthResponse, Probe, ProbeState, Probes};
use crate::state::AppState;

/// Reports whether the service can reach its database.
///
/// # Endpoint
///
/// `GET /health`
///
/// **200 OK** when every probe passes, **503 Service Unavailable** otherwise.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "database": { "status": "ok", "latencyMs": 2 } }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse::from_probes(Probes {
        database: probe_database(&state).await,
    });

    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

async fn probe_database(state: &AppState) -> Probe {
    let started = Instant::now();
    let result = state.link_service.ping().await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(()) => Probe {
            status: ProbeState::Ok,
            latency_ms,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, latency_ms, "Database probe failed");
            Probe {
                status: ProbeState::Error,
                latency_ms,
                error: Some(e.to_string()),
            }
        }
    }
}
