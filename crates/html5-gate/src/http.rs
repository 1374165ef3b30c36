//! HTTP client for a Nu HTML checker compatible validator service.
//!
//! Documents are POSTed to `<url>?out=json` with a `text/html` body and the
//! JSON response is decoded into a [`ValidationResult`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::ValidationBackend;
use crate::error::GateError;
use crate::message::ValidationResult;
use crate::Result;

/// Public validator instance used when nothing else is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://validator.nu/";

/// HTTP backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpBackendConfig {
    /// Validator endpoint (optional; without one the backend is never available)
    pub service_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        HttpBackendConfig {
            service_url: Some(DEFAULT_SERVICE_URL.to_string()),
            timeout: Duration::from_secs(10),
            user_agent: format!("html5-gate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpBackendConfig {
    /// Create config for a specific endpoint
    pub fn new(service_url: &str) -> Self {
        HttpBackendConfig {
            service_url: Some(service_url.to_string()),
            ..Default::default()
        }
    }

    /// Config with no endpoint at all
    pub fn unconfigured() -> Self {
        HttpBackendConfig {
            service_url: None,
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Validator backend speaking HTTP
pub struct HttpBackend {
    config: HttpBackendConfig,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend
    pub fn new(config: HttpBackendConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(HttpBackend {
            config,
            http_client,
        })
    }

    fn check_url(base: &str) -> String {
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{}{}out=json", base, separator)
    }
}

#[async_trait]
impl ValidationBackend for HttpBackend {
    fn service_url(&self) -> Option<&str> {
        self.config.service_url.as_deref()
    }

    async fn is_available(&self) -> bool {
        let Some(url) = self.service_url() else {
            return false;
        };

        match self.http_client.get(url).send().await {
            Ok(response) => {
                debug!(url, status = %response.status(), "validator probe");
                response.status().is_success()
            }
            Err(err) => {
                debug!(url, error = %err, "validator probe failed");
                false
            }
        }
    }

    async fn validate(&self, html: &str) -> Result<ValidationResult> {
        let base = self.service_url().ok_or(GateError::ServiceNotConfigured)?;
        let url = Self::check_url(base);
        debug!(url = %url, bytes = html.len(), "submitting document to validator");

        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(html.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, %status, "validator rejected submission");
            return Err(GateError::Http(format!(
                "validator responded with status {}",
                status
            )));
        }

        let body = response.bytes().await?;
        let result: ValidationResult = serde_json::from_slice(&body)?;
        debug!(messages = result.messages.len(), "validator response decoded");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpBackendConfig::default();
        assert_eq!(config.service_url.as_deref(), Some(DEFAULT_SERVICE_URL));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("html5-gate/"));
    }

    #[test]
    fn test_config_with_timeout() {
        let config = HttpBackendConfig::new("http://localhost:8888/")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.service_url.as_deref(), Some("http://localhost:8888/"));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_check_url_appends_output_format() {
        assert_eq!(
            HttpBackend::check_url("http://localhost:8888/"),
            "http://localhost:8888/?out=json"
        );
        assert_eq!(
            HttpBackend::check_url("http://localhost:8888/?parser=html5"),
            "http://localhost:8888/?parser=html5&out=json"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_backend_is_never_available() {
        let backend = HttpBackend::new(HttpBackendConfig::unconfigured()).unwrap();
        assert_eq!(backend.service_url(), None);
        assert!(!backend.is_available().await);
        assert!(matches!(
            backend.validate("<p>").await,
            Err(GateError::ServiceNotConfigured)
        ));
    }
}
