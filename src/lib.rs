//! # Patient Dashboard
//!
//! Fetches patient records from a remote service over Basic-Auth HTTP and
//! presents them as a three-panel diagnosis dashboard.
//!
//! ## Features
//!
//! - **Typed records**: Patient profiles, monthly vitals and diagnoses
//! - **Single load**: One GET on start, no retries or caching
//! - **Explicit state**: Immutable snapshots advanced by discrete transitions
//! - **Views**: Patient list, blood-pressure history and detail panels
//!
//! ## Modules
//!
//! - [`credentials`]: Static Basic-Auth token
//! - [`loader`]: Patient fetch and default selection
//! - [`dashboard`]: Dashboard state transitions
//! - [`view`]: Panel view models and text rendering
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use patient_dashboard::credentials::get_auth_token;
//! use patient_dashboard::dashboard::DashboardState;
//! use patient_dashboard::loader::*;
//! use patient_dashboard::view::{render_text, DashboardView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpPatientSource::new(SourceConfig::default())?;
//!     let state = DashboardState::new();
//!
//!     let state = match load_patients(&source, &get_auth_token(), DEFAULT_PATIENT_NAME).await {
//!         Ok(loaded) => state.loaded(loaded),
//!         Err(e) => state.failed(e.to_string()),
//!     };
//!
//!     print!("{}", render_text(&DashboardView::from_state(&state)));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod credentials;
pub mod dashboard;
pub mod loader;
pub mod records;
pub mod view;

// Re-export top-level types for convenience
pub use records::{
    BloodPressure, DiagnosisHistoryEntry, Diagnostic, Patient, Reading, ReadingValue,
};

pub use credentials::{get_auth_token, Credentials};

pub use loader::{
    get_patient_data, load_patients, select_default, HttpPatientSource, LoadError, LoadResult,
    LoadSink, Loaded, PatientSource, SourceConfig,
};

pub use dashboard::{DashboardState, LoadStatus, SelectionError};

pub use view::{render_text, DashboardView, Panels};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, ConfigReport, LoggingConfig, PatientSourceConfig, ServerConfig,
};
