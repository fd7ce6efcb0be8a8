//! # Client configuration
//!
//! Where the REST API lives and how long to wait for it. The defaults come
//! from the `API_BASE_URL` environment variable captured at build time, with
//! a local development fallback. A TOML document can override any field:
//!
//! ```toml
//! [api]
//! base_url = "https://kursus.example.com/api"
//! storage_url = "https://cdn.example.com"   # optional, defaults to base_url minus `/api`
//!
//! [request]
//! timeout_secs = 30
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with URL helpers for API paths and `/storage/**` assets. |
//! | [`ApiConfig`] | Base URL of the REST API and optional static-asset host. |
//! | [`RequestConfig`] | Per-request timeout (native builds only; the browser manages its own). |

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize client config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Fallback used when `API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Host serving `/storage/**`. Derived from `base_url` when absent.
    #[serde(default)]
    pub storage_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage_url: None,
        }
    }
}

fn default_base_url() -> String {
    option_env!("API_BASE_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at an explicit API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                storage_url: None,
            },
            request: RequestConfig::default(),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request.timeout_secs = secs;
        self
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Absolute URL of an API path such as `/courses/3`.
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api.base_url, path)
    }

    /// Host that serves `/storage/**`.
    pub fn storage_host(&self) -> String {
        if let Some(url) = &self.api.storage_url {
            return url.trim_end_matches('/').to_string();
        }
        let base = self.api.base_url.trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base).to_string()
    }

    /// Public URL of a stored file. Accepts `thumbnails/a.png`,
    /// `storage/thumbnails/a.png`, `/storage/...`, or an absolute URL.
    pub fn storage_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let trimmed = path.trim_start_matches('/');
        let relative = trimmed.strip_prefix("storage/").unwrap_or(trimmed);
        format!("{}/storage/{}", self.storage_host(), relative)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(!config.api.base_url.is_empty());
        assert_eq!(config.request.timeout_secs, 30);
        assert_eq!(config.api.storage_url, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            ClientConfig::from_toml("[api]\nbase_url = \"https://kursus.test/api\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://kursus.test/api");
        assert_eq!(config.request.timeout_secs, 30);

        let config = ClientConfig::from_toml("[request]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.request.timeout_secs, 5);
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = ClientConfig::from_toml("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClientConfig::new("https://kursus.test/api").with_timeout(12);
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_api_url_joins_slashes() {
        let config = ClientConfig::new("http://localhost:8000/api/");
        assert_eq!(config.api_url("/courses/3"), "http://localhost:8000/api/courses/3");
        assert_eq!(config.api_url("login"), "http://localhost:8000/api/login");
    }

    #[test]
    fn test_storage_url_strips_api_segment() {
        let config = ClientConfig::new("http://localhost:8000/api");
        assert_eq!(
            config.storage_url("thumbnails/a.png"),
            "http://localhost:8000/storage/thumbnails/a.png"
        );
        assert_eq!(
            config.storage_url("/storage/pdfs/b.pdf"),
            "http://localhost:8000/storage/pdfs/b.pdf"
        );
        assert_eq!(
            config.storage_url("https://cdn.test/x.png"),
            "https://cdn.test/x.png"
        );
    }

    #[test]
    fn test_storage_override() {
        let config = ClientConfig::from_toml(
            "[api]\nbase_url = \"https://a.test/api\"\nstorage_url = \"https://files.test/\"\n",
        )
        .unwrap();
        assert_eq!(config.storage_url("x.pdf"), "https://files.test/storage/x.pdf");
    }
}
