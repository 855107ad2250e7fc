//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiConfig;
use crate::credentials::{Credentials, DEFAULT_PASSWORD, DEFAULT_USERNAME};
use crate::loader::{SourceConfig, DEFAULT_PATIENT_NAME, DEFAULT_SOURCE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: PatientSourceConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote patient service configuration
#[derive(Clone, Deserialize)]
pub struct PatientSourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Name of the patient selected after a load
    #[serde(default = "default_patient")]
    pub default_patient: String,

    #[serde(default = "default_source_timeout")]
    pub request_timeout_ms: u64,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

fn default_patient() -> String {
    DEFAULT_PATIENT_NAME.to_string()
}

fn default_source_timeout() -> u64 {
    10_000 // 10 seconds
}

impl Default for PatientSourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            username: default_username(),
            password: default_password(),
            default_patient: default_patient(),
            request_timeout_ms: default_source_timeout(),
        }
    }
}

impl std::fmt::Debug for PatientSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientSourceConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("default_patient", &self.default_patient)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl PatientSourceConfig {
    /// Settings for the HTTP patient source
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            url: self.url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

/// Dashboard API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> String {
        format!("patient_dashboard={},tower_http={}", self.level, self.level)
    }

    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level. Format is `json` or
    /// anything else for the human-readable layer. Logs go to stderr so
    /// CLI output on stdout stays clean.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| self.filter_directive().into());

        let registry = tracing_subscriber::registry().with(filter);

        if self.format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so the outcome is returned as a
    /// [`ConfigReport`] to be logged once the subscriber is installed.
    pub fn load_default() -> (Self, ConfigReport) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("patient-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/patient-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing path that parses, else defaults + env
    fn load_first(paths: &[PathBuf]) -> (Self, ConfigReport) {
        let mut report = ConfigReport::default();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    report.path = Some(path.clone());
                    return (config, report);
                }
                Err(e) => report.skipped.push(e),
            }
        }

        (Self::from_env(), report)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Source overrides
        if let Some(url) = lookup("PATIENT_DASHBOARD_SOURCE_URL") {
            self.source.url = url;
        }
        if let Some(name) = lookup("PATIENT_DASHBOARD_DEFAULT_PATIENT") {
            self.source.default_patient = name;
        }

        // Server overrides
        if let Some(host) = lookup("PATIENT_DASHBOARD_API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PATIENT_DASHBOARD_API_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("PATIENT_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PATIENT_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where [`Config::load_default`] got its settings from
#[derive(Debug, Default)]
pub struct ConfigReport {
    /// File the config was read from; `None` means defaults + env
    pub path: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl ConfigReport {
    /// Log the outcome; call after the subscriber is installed
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("{}", error);
        }

        match &self.path {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Patient Dashboard Configuration
#
# Environment variables override these settings:
# - PATIENT_DASHBOARD_SOURCE_URL
# - PATIENT_DASHBOARD_DEFAULT_PATIENT
# - PATIENT_DASHBOARD_API_HOST
# - PATIENT_DASHBOARD_API_PORT
# - PATIENT_DASHBOARD_LOG_LEVEL
# - PATIENT_DASHBOARD_LOG_FORMAT

[source]
# Patient service endpoint
url = "https://fedskillstest.coalitiontechnologies.workers.dev"

# Basic-Auth credentials sent with every fetch
username = "coalition"
password = "skills-test"

# Patient selected after each load
default_patient = "Jessica Taylor"

# Request timeout (ms)
request_timeout_ms = 10000

[server]
# Dashboard API host
host = "0.0.0.0"

# Dashboard API port
port = 8090

# Allowed CORS origins (empty = permissive)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
