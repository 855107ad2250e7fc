//! Patient Service HTTP Client
//!
//! Fetches the patient list from the remote endpoint with a Basic-Auth
//! header. One GET per call: no retries, no caching.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use super::error::{LoadError, LoadResult};
use crate::records::Patient;

/// Remote endpoint serving the patient list
pub const DEFAULT_SOURCE_URL: &str = "https://fedskillstest.coalitiontechnologies.workers.dev";

/// Patient selected by default after a successful load
pub const DEFAULT_PATIENT_NAME: &str = "Jessica Taylor";

/// Anything that can produce the patient list for a given auth token
#[async_trait]
pub trait PatientSource: Send + Sync {
    /// Where the records come from, for logs
    fn endpoint(&self) -> &str;

    /// Fetch the full patient list
    async fn fetch(&self, token: &str) -> LoadResult<Vec<Patient>>;
}

/// Configuration for the HTTP patient source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Endpoint URL
    pub url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl SourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Patient source backed by the remote HTTP service
pub struct HttpPatientSource {
    client: Client,
    config: SourceConfig,
}

impl HttpPatientSource {
    /// Create a new source with the given configuration
    pub fn new(config: SourceConfig) -> LoadResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl PatientSource for HttpPatientSource {
    fn endpoint(&self) -> &str {
        &self.config.url
    }

    async fn fetch(&self, token: &str) -> LoadResult<Vec<Patient>> {
        let url = &self.config.url;

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Basic {}", token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| LoadError::from_request(e, url))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LoadError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::from_request(e, url))?;

        let patients = parse_patients(&body)?;
        tracing::debug!(url = %url, count = patients.len(), "Fetched patient records");
        Ok(patients)
    }
}

/// Parse a response body into patient records, preserving order
pub fn parse_patients(body: &str) -> LoadResult<Vec<Patient>> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::get_auth_token;
    use crate::loader::testing::{spawn_service, spawn_slow_service, unused_url};
    use axum::http::StatusCode;

    #[test]
    fn test_default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_parse_rejects_object_body() {
        let err = parse_patients(r#"{"name":"Jessica Taylor"}"#).unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn test_fetch_sends_auth_headers() {
        let service = spawn_service(StatusCode::OK, "[]").await;
        let source = HttpPatientSource::new(SourceConfig::new(&service.url)).unwrap();

        let patients = source.fetch(&get_auth_token()).await.unwrap();
        assert!(patients.is_empty());

        let headers = service.last_headers().unwrap();
        assert_eq!(
            headers.get("authorization").unwrap(),
            "Basic Y29hbGl0aW9uOnNraWxscy10ZXN0"
        );
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_fetch_preserves_order() {
        let body = r#"[
            {"name":"Emily Williams","diagnosis_history":[],"diagnostic_list":[],"lab_results":[]},
            {"name":"Ryan Johnson","diagnosis_history":[],"diagnostic_list":[],"lab_results":[]},
            {"name":"Brandon Mitchell","diagnosis_history":[],"diagnostic_list":[],"lab_results":[]}
        ]"#;
        let service = spawn_service(StatusCode::OK, body).await;
        let source = HttpPatientSource::new(SourceConfig::new(&service.url)).unwrap();

        let names: Vec<String> = source
            .fetch("token")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Emily Williams", "Ryan Johnson", "Brandon Mitchell"]);
    }

    #[tokio::test]
    async fn test_fetch_unauthorized() {
        let service = spawn_service(StatusCode::UNAUTHORIZED, "Unauthorized").await;
        let source = HttpPatientSource::new(SourceConfig::new(&service.url)).unwrap();

        let err = source.fetch("wrong").await.unwrap_err();
        assert!(matches!(err, LoadError::Http { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let service = spawn_service(StatusCode::OK, "<html>oops</html>").await;
        let source = HttpPatientSource::new(SourceConfig::new(&service.url)).unwrap();

        let err = source.fetch("token").await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let service = spawn_slow_service(StatusCode::OK, "[]", Duration::from_millis(500)).await;
        let config = SourceConfig {
            url: service.url.clone(),
            request_timeout_ms: 50,
        };
        let source = HttpPatientSource::new(config).unwrap();

        let err = source.fetch("token").await.unwrap_err();
        assert!(matches!(err, LoadError::Timeout));
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let url = unused_url().await;
        let source = HttpPatientSource::new(SourceConfig::new(&url)).unwrap();

        let err = source.fetch("token").await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
