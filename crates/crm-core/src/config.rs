//! API endpoint configuration.
//!
//! The base URL can be overridden with the `CRM_API_BASE_URL` environment
//! variable; the request timeout and endpoint paths are fixed.

use std::time::Duration;

/// Default API base URL for local development.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Environment variable that overrides the API base URL.
const BASE_URL_ENV: &str = "CRM_API_BASE_URL";

/// HTTP request timeout in milliseconds.
/// Applies to every outbound call, including token renewal.
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "login/";

/// Registration endpoint, relative to the base URL.
pub const REGISTER_PATH: &str = "register/";

/// Current-user profile endpoint, relative to the base URL.
pub const PROFILE_PATH: &str = "profile/";

/// Token renewal endpoint, relative to the base URL.
pub const TOKEN_REFRESH_PATH: &str = "token/refresh/";

/// Connection settings for the CRM backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every request path is resolved against. Always ends in `/`.
    pub base_url: String,
    /// Timeout applied to each outbound call.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    /// Read the base URL from `CRM_API_BASE_URL`, falling back to the
    /// local development default.
    fn default() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve a relative path against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}
