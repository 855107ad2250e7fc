//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not view
//! models themselves.

use serde::{Deserialize, Serialize};

use crate::dashboard::LoadStatus;

// ============================================
// SELECTION DTOs
// ============================================

/// Select a patient by name
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub name: String,
}

// ============================================
// RELOAD DTOs
// ============================================

/// Outcome of a reload
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Status: "ok"
    pub status: String,
    /// Number of records loaded
    pub patients: usize,
    /// Name of the selected record, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, loading, degraded
    pub status: String,
    /// Dashboard load status
    pub load: LoadStatus,
    /// Number of loaded records
    pub patients: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
