//! Selection Routes
//!
//! - GET /api/v1/selection - Currently selected patient record
//! - PUT /api/v1/selection - Select a loaded patient by name

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::SelectRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::records::Patient;
use crate::view::DashboardView;

/// GET /api/v1/selection
pub async fn get_selection(State(state): State<Arc<AppState>>) -> ApiResult<Json<Patient>> {
    let snapshot = state.snapshot().await;

    snapshot
        .selected_patient()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No patient selected".to_string()))
}

/// PUT /api/v1/selection
///
/// Returns the dashboard view after the selection changed.
pub async fn put_selection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> ApiResult<Json<DashboardView>> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }

    // Names match exactly, surrounding whitespace included
    let snapshot = state.select(&req.name).await?;
    Ok(Json(DashboardView::from_state(&snapshot)))
}
