//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::credentials::Credentials;
use crate::dashboard::{DashboardState, SelectionError};
use crate::loader::{get_patient_data, LoadError, Loaded, PatientSource};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Current dashboard snapshot; replaced whole on every transition
    pub dashboard: Arc<RwLock<DashboardState>>,
    /// Where patient records are fetched from
    pub source: Arc<dyn PatientSource>,
    /// Basic-Auth pair for the source
    pub credentials: Credentials,
    /// Name selected by default after a load
    pub default_patient: String,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState in the loading state
    pub fn new(
        source: Arc<dyn PatientSource>,
        credentials: Credentials,
        default_patient: impl Into<String>,
        config: ApiConfig,
    ) -> Self {
        Self {
            dashboard: Arc::new(RwLock::new(DashboardState::new())),
            source,
            credentials,
            default_patient: default_patient.into(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Copy of the current snapshot
    pub async fn snapshot(&self) -> DashboardState {
        self.dashboard.read().await.clone()
    }

    /// Fetch the patient list and apply the outcome as a transition
    ///
    /// Failures are logged and move the dashboard to its failed state,
    /// keeping the previously loaded list; the error is still returned so
    /// the caller can report it.
    pub async fn reload(&self) -> Result<DashboardState, LoadError> {
        let token = self.credentials.token();
        let mut staged = Loaded::default();
        let result = get_patient_data(
            self.source.as_ref(),
            &token,
            &self.default_patient,
            &mut staged,
        )
        .await;

        let mut dashboard = self.dashboard.write().await;
        match result {
            Ok(()) => {
                let next = dashboard.loaded(staged);
                *dashboard = next.clone();
                Ok(next)
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.source.endpoint(),
                    kind = e.kind(),
                    error = %e,
                    "Error fetching patient data"
                );
                let next = dashboard.failed(e.to_string());
                *dashboard = next;
                Err(e)
            }
        }
    }

    /// Select a loaded patient by name
    pub async fn select(&self, name: &str) -> Result<DashboardState, SelectionError> {
        let mut dashboard = self.dashboard.write().await;
        let next = dashboard.select_by_name(name)?;
        *dashboard = next.clone();

        tracing::debug!(patient = %name, "Selection changed");
        Ok(next)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty means permissive
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
