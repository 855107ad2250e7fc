//! Patient Dashboard API Server
//!
//! Run with: cargo run --bin patient-dashboard
//!
//! Loads configuration (see `patient-dashboard-cli config`), fetches the
//! patient list once, then serves the dashboard until shut down.
//!
//! # Configuration
//!
//! Environment variables:
//! - `PATIENT_DASHBOARD_SOURCE_URL`: Patient service endpoint
//! - `PATIENT_DASHBOARD_DEFAULT_PATIENT`: Patient selected after a load
//! - `PATIENT_DASHBOARD_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `PATIENT_DASHBOARD_API_PORT`: Port to listen on (default: 8090)
//! - `PATIENT_DASHBOARD_LOG_LEVEL`, `PATIENT_DASHBOARD_LOG_FORMAT`
//! - `RUST_LOG`: Overrides the configured log filter

use patient_dashboard::api::{serve, AppState};
use patient_dashboard::config::Config;
use patient_dashboard::loader::HttpPatientSource;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, report) = Config::load_default();
    config.logging.init();
    report.log();

    tracing::info!("Starting patient dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Patient source: {}", config.source.url);

    let source = Arc::new(HttpPatientSource::new(config.source.source_config())?);
    let api_config = config.server.api_config();

    let state = AppState::new(
        source,
        config.source.credentials(),
        config.source.default_patient.clone(),
        api_config.clone(),
    );

    // Single load at startup; a failure is logged and leaves the
    // dashboard empty until POST /api/v1/reload.
    if state.reload().await.is_err() {
        tracing::warn!("Serving without patient data");
    }

    serve(state, &api_config).await?;

    tracing::info!("Patient dashboard stopped");
    Ok(())
}
