//! Test helpers: a throwaway local patient service and an in-memory source.

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::client::PatientSource;
use super::error::{LoadError, LoadResult};
use crate::records::Patient;

/// Local HTTP service answering every GET / with a fixed status and body
pub struct TestService {
    pub url: String,
    headers: Arc<Mutex<Option<HeaderMap>>>,
}

impl TestService {
    /// Headers of the most recent request
    pub fn last_headers(&self) -> Option<HeaderMap> {
        self.headers.lock().unwrap().clone()
    }
}

pub async fn spawn_service(status: StatusCode, body: &'static str) -> TestService {
    spawn_slow_service(status, body, Duration::ZERO).await
}

/// Like [`spawn_service`], but every response waits `delay` first
pub async fn spawn_slow_service(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> TestService {
    let headers = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&headers);

    let app = Router::new().route(
        "/",
        get(move |request_headers: HeaderMap| {
            let seen = Arc::clone(&seen);
            async move {
                *seen.lock().unwrap() = Some(request_headers);
                tokio::time::sleep(delay).await;
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestService {
        url: format!("http://{}", addr),
        headers,
    }
}

/// URL of a local port with nothing listening on it
pub async fn unused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// In-memory source returning a fixed list, or a fixed HTTP failure
pub struct StaticSource {
    patients: Vec<Patient>,
    fail_status: Mutex<Option<u16>>,
}

impl StaticSource {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self {
            patients,
            fail_status: Mutex::new(None),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            patients: Vec::new(),
            fail_status: Mutex::new(Some(status)),
        }
    }

    /// Make every later fetch fail with `status`
    pub fn fail_with(&self, status: u16) {
        *self.fail_status.lock().unwrap() = Some(status);
    }
}

#[async_trait]
impl PatientSource for StaticSource {
    fn endpoint(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, _token: &str) -> LoadResult<Vec<Patient>> {
        let fail_status = *self.fail_status.lock().unwrap();
        match fail_status {
            Some(status) => Err(LoadError::Http {
                status,
                message: String::new(),
            }),
            None => Ok(self.patients.clone()),
        }
    }
}

/// Three records, the middle one being the default patient
pub fn sample_patients() -> Vec<Patient> {
    use crate::records::{DiagnosisHistoryEntry, Diagnostic};

    vec![
        Patient::new("Emily Williams").gender("Female").age(18),
        Patient::new("Jessica Taylor")
            .gender("Female")
            .age(28)
            .date_of_birth("08/23/1996")
            .phone_number("(415) 555-1234")
            .emergency_contact("(415) 555-5678")
            .insurance_type("Sunrise Health Assurance")
            .profile_picture("https://fedskillstest.ct.digital/4.png")
            .history(
                DiagnosisHistoryEntry::new("March", 2024, 160, 78)
                    .heart_rate(78)
                    .respiratory_rate(20)
                    .temperature(98.6),
            )
            .history(DiagnosisHistoryEntry::new("February", 2024, 117, 63))
            .history(DiagnosisHistoryEntry::new("January", 2024, 139, 92))
            .diagnostic(Diagnostic::new(
                "Hypertension",
                "Chronic high blood pressure",
                "Under Observation",
            ))
            .lab_result("Blood Tests")
            .lab_result("CT Scans"),
        Patient::new("Ryan Johnson").gender("Male").age(45),
    ]
}
