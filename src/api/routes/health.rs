//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (patient list loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::dashboard::LoadStatus;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once a load has succeeded, 503 while loading or failed.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.snapshot().await.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with load details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.snapshot().await;

    let status = match snapshot.status() {
        LoadStatus::Ready { .. } => "healthy",
        LoadStatus::Loading => "loading",
        LoadStatus::Failed { .. } => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        load: snapshot.status().clone(),
        patients: snapshot.patients().len(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
