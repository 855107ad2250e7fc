//! Patient Dashboard REST API
//!
//! HTTP API layer serving the dashboard view models, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Full three-panel view
//! - `GET /api/v1/patients` - Patient list panel
//! - `POST /api/v1/reload` - Fetch the patient list again
//!
//! ## Selection
//! - `GET /api/v1/selection` - Selected patient record
//! - `PUT /api/v1/selection` - Select a patient by name
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use patient_dashboard::api::{serve, ApiConfig, AppState};
//! use patient_dashboard::credentials::Credentials;
//! use patient_dashboard::loader::{HttpPatientSource, SourceConfig, DEFAULT_PATIENT_NAME};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(HttpPatientSource::new(SourceConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(source, Credentials::default(), DEFAULT_PATIENT_NAME, config.clone());
//!     let _ = state.reload().await;
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/patients", get(routes::dashboard::list_patients))
        .route("/reload", post(routes::dashboard::reload))
        // Selection routes
        .route(
            "/selection",
            get(routes::selection::get_selection).put(routes::selection::put_selection),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Patient dashboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Patient dashboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;
    use crate::loader::testing::{sample_patients, spawn_slow_service, StaticSource};
    use crate::loader::{HttpPatientSource, SourceConfig, DEFAULT_PATIENT_NAME};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    async fn create_test_app(source: StaticSource, load: bool) -> Router {
        let state = AppState::new(
            Arc::new(source),
            Credentials::default(),
            DEFAULT_PATIENT_NAME,
            ApiConfig::default(),
        );
        if load {
            let _ = state.reload().await;
        }
        build_router(state)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn reload_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/reload")
            .body(Body::empty())
            .unwrap()
    }

    fn select_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri("/api/v1/selection")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(StaticSource::new(sample_patients()), false).await;

        let response = app.oneshot(get_request("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_before_load() {
        let app = create_test_app(StaticSource::new(sample_patients()), false).await;

        let response = app.oneshot(get_request("/health/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full_after_load() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["load"]["state"], "ready");
        assert_eq!(json["patients"], 3);
    }

    #[tokio::test]
    async fn test_dashboard_loading() {
        let app = create_test_app(StaticSource::new(sample_patients()), false).await;

        let response = app.oneshot(get_request("/api/v1/dashboard")).await.unwrap();
        let json = body_json(response).await;

        assert_eq!(json["view"], "loading");
    }

    #[tokio::test]
    async fn test_dashboard_ready() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app.oneshot(get_request("/api/v1/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["view"], "ready");
        assert_eq!(json["patients"].as_array().unwrap().len(), 3);
        assert_eq!(json["patients"][1]["selected"], true);
        assert_eq!(json["detail"]["name"], "Jessica Taylor");
        assert_eq!(json["diagnosis"]["chart"]["labels"][0], "January 2024");
    }

    #[tokio::test]
    async fn test_dashboard_after_unauthorized() {
        let app = create_test_app(StaticSource::failing(401), true).await;

        let response = app.oneshot(get_request("/api/v1/dashboard")).await.unwrap();
        let json = body_json(response).await;

        assert_eq!(json["view"], "empty");
        assert_eq!(json["message"], "No patient data available.");
    }

    #[tokio::test]
    async fn test_list_patients() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app.oneshot(get_request("/api/v1/patients")).await.unwrap();
        let json = body_json(response).await;

        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Emily Williams", "Jessica Taylor", "Ryan Johnson"]);
    }

    #[tokio::test]
    async fn test_get_selection() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app.oneshot(get_request("/api/v1/selection")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["name"], "Jessica Taylor");
        assert_eq!(json["lab_results"][1], "CT Scans");
    }

    #[tokio::test]
    async fn test_get_selection_none() {
        let source = StaticSource::new(vec![crate::records::Patient::new("John Doe")]);
        let app = create_test_app(source, true).await;

        let response = app.oneshot(get_request("/api/v1/selection")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_selection() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app
            .clone()
            .oneshot(select_request(r#"{"name": "Ryan Johnson"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["detail"]["name"], "Ryan Johnson");
        assert_eq!(json["patients"][2]["selected"], true);
        assert_eq!(json["patients"][1]["selected"], false);

        // Selection persists for later reads
        let response = app.oneshot(get_request("/api/v1/selection")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["name"], "Ryan Johnson");
    }

    #[tokio::test]
    async fn test_put_selection_unknown() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app
            .oneshot(select_request(r#"{"name": "Nobody"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "PATIENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_put_selection_is_exact() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app
            .oneshot(select_request(r#"{"name": " Jessica Taylor "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_selection_empty_name() {
        let app = create_test_app(StaticSource::new(sample_patients()), true).await;

        let response = app.oneshot(select_request(r#"{"name": "  "}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reload() {
        let app = create_test_app(StaticSource::new(sample_patients()), false).await;

        let response = app
            .oneshot(reload_request())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["patients"], 3);
        assert_eq!(json["selected"], "Jessica Taylor");
    }

    #[tokio::test]
    async fn test_reload_upstream_failure() {
        let app = create_test_app(StaticSource::failing(500), false).await;

        let response = app
            .oneshot(reload_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_dashboard() {
        let source = Arc::new(StaticSource::new(sample_patients()));
        let state = AppState::new(
            source.clone(),
            Credentials::default(),
            DEFAULT_PATIENT_NAME,
            ApiConfig::default(),
        );
        state.reload().await.unwrap();
        let app = build_router(state);

        source.fail_with(401);
        let response = app.clone().oneshot(reload_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = app.clone().oneshot(get_request("/api/v1/dashboard")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["view"], "ready");
        assert_eq!(json["patients"].as_array().unwrap().len(), 3);
        assert_eq!(json["detail"]["name"], "Jessica Taylor");

        let response = app.oneshot(get_request("/health")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["patients"], 3);
    }

    #[tokio::test]
    async fn test_reload_upstream_timeout() {
        let service = spawn_slow_service(StatusCode::OK, "[]", Duration::from_millis(500)).await;
        let source = HttpPatientSource::new(SourceConfig {
            url: service.url.clone(),
            request_timeout_ms: 50,
        })
        .unwrap();
        let state = AppState::new(
            Arc::new(source),
            Credentials::default(),
            DEFAULT_PATIENT_NAME,
            ApiConfig::default(),
        );
        let app = build_router(state);

        let response = app.oneshot(reload_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_TIMEOUT");
    }

    #[test]
    fn test_cors_layer_with_origins() {
        // Invalid origins are skipped rather than rejected
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
    }
}
