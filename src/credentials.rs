//! Credential Provider
//!
//! Produces the static Basic-Auth token sent with every patient fetch.
//! The pair is fixed at build time (optionally overridden by config);
//! there is no secret store behind it.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Built-in username for the patient service
pub const DEFAULT_USERNAME: &str = "coalition";

/// Built-in password for the patient service
pub const DEFAULT_PASSWORD: &str = "skills-test";

/// Username/password pair for Basic-Auth
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// base64 of `username:password`
    pub fn token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.username, self.password))
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.token())
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Token for the built-in credential pair
pub fn get_auth_token() -> String {
    Credentials::default().token()
}
