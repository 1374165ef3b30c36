//! Validation backend capability.
//!
//! The gate never talks to the network itself. Everything it needs from the
//! validator service goes through [`ValidationBackend`]: the configured
//! endpoint, a liveness probe and the validation call.

use async_trait::async_trait;

use crate::message::ValidationResult;
use crate::Result;

/// Capability the gate consumes to get a verdict for a document.
#[async_trait]
pub trait ValidationBackend: Send + Sync {
    /// Configured endpoint; `None` means no service is configured.
    fn service_url(&self) -> Option<&str>;

    /// Liveness probe against the configured endpoint.
    ///
    /// Must not fail: unreachable services and transport errors are `false`.
    async fn is_available(&self) -> bool;

    /// Submit `html` for validation.
    ///
    /// An `Err` means no verdict could be obtained, as opposed to a
    /// completed validation that found issues.
    async fn validate(&self, html: &str) -> Result<ValidationResult>;
}

#[async_trait]
impl<B: ValidationBackend + ?Sized> ValidationBackend for std::sync::Arc<B> {
    fn service_url(&self) -> Option<&str> {
        (**self).service_url()
    }

    async fn is_available(&self) -> bool {
        (**self).is_available().await
    }

    async fn validate(&self, html: &str) -> Result<ValidationResult> {
        (**self).validate(html).await
    }
}
