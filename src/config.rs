//! Client Configuration
//!
//! Backend location and storage keys. The base URL is fixed at build time
//! through `TASKBOARD_API_URL`.

/// Backend used when `TASKBOARD_API_URL` is not set at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin without trailing slash
    pub api_base_url: String,
    /// localStorage key of the bearer token
    pub access_token_key: String,
    /// localStorage key of the refresh token
    pub refresh_token_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token_key: "accessToken".to_string(),
            refresh_token_key: "refreshToken".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the build environment
    pub fn from_build_env() -> Self {
        Self::default().with_base_url(option_env!("TASKBOARD_API_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    /// Absolute URL for an API path (`/api/...`)
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}
