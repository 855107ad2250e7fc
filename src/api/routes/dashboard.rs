//! Dashboard Routes
//!
//! Read the current view and trigger a reload.
//!
//! - GET /api/v1/dashboard - Full three-panel view
//! - GET /api/v1/patients - Patient list panel
//! - POST /api/v1/reload - Fetch the patient list again

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::ReloadResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::view::{patient_list, DashboardView, PatientListItem};

/// GET /api/v1/dashboard
///
/// Loading, empty ("No patient data available.") or the ready panels.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let snapshot = state.snapshot().await;
    Json(DashboardView::from_state(&snapshot))
}

/// GET /api/v1/patients
pub async fn list_patients(State(state): State<Arc<AppState>>) -> Json<Vec<PatientListItem>> {
    let snapshot = state.snapshot().await;
    Json(patient_list(&snapshot))
}

/// POST /api/v1/reload
///
/// Replaces the list wholesale. A failed fetch leaves the dashboard in its
/// failed state and answers with an upstream error.
pub async fn reload(State(state): State<Arc<AppState>>) -> ApiResult<Json<ReloadResponse>> {
    let snapshot = state.reload().await?;

    Ok(Json(ReloadResponse {
        status: "ok".to_string(),
        patients: snapshot.patients().len(),
        selected: snapshot.selected_patient().map(|p| p.name.clone()),
    }))
}
