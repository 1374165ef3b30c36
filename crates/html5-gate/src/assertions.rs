//! Assertion helpers for test suites.
//!
//! Wraps a [`ValidationGate`] with the `enabled` switch from
//! [`Html5ValidationConfig`]. Calling a helper while validation is disabled
//! is a test-authoring error and fails with [`GateError::Disabled`] before
//! the backend is touched.

use crate::config::Html5ValidationConfig;
use crate::error::GateError;
use crate::gate::ValidationGate;
use crate::http::HttpBackend;
use crate::message::ValidationOutcome;
use crate::report::assertion_failure_message;
use crate::ValidationBackend;
use crate::Result;

/// What a test should do with an assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionVerdict {
    Passed,
    /// Mark the test as skipped with this reason.
    Skipped { reason: String },
    /// Fail the test with this exact message.
    Failed { message: String },
}

impl From<ValidationOutcome> for AssertionVerdict {
    fn from(outcome: ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Pass => AssertionVerdict::Passed,
            ValidationOutcome::Skip { reason } => AssertionVerdict::Skipped { reason },
            ValidationOutcome::Fail { rendered_report } => AssertionVerdict::Failed {
                message: assertion_failure_message(&rendered_report),
            },
        }
    }
}

pub struct Html5Assertions<B> {
    gate: ValidationGate<B>,
    enabled: bool,
}

impl Html5Assertions<HttpBackend> {
    /// Build an HTTP-backed helper from configuration.
    pub fn from_config(config: &Html5ValidationConfig) -> Result<Self> {
        let backend = HttpBackend::new(config.backend_config())?;
        let gate = ValidationGate::new(backend).with_ignores(config.ignore_rules()?);
        Ok(Self::new(gate, config.enabled))
    }
}

impl<B: ValidationBackend> Html5Assertions<B> {
    pub fn new(gate: ValidationGate<B>, enabled: bool) -> Self {
        Self { gate, enabled }
    }

    pub fn gate(&self) -> &ValidationGate<B> {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut ValidationGate<B> {
        &mut self.gate
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn ensure_enabled(&self, method: &str) -> Result<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(GateError::Disabled {
                method: method.to_string(),
            })
        }
    }

    /// Assert that a full document is valid HTML5.
    pub async fn assert_is_valid_html5(
        &self,
        html: &str,
        label: Option<&str>,
    ) -> Result<AssertionVerdict> {
        self.ensure_enabled("assert_is_valid_html5")?;
        Ok(self.gate.evaluate(html, label).await.into())
    }

    /// Assert that a fragment is valid once embedded into the wrapper.
    pub async fn assert_is_valid_html5_snippet(
        &self,
        fragment: &str,
        label: Option<&str>,
    ) -> Result<AssertionVerdict> {
        self.ensure_enabled("assert_is_valid_html5_snippet")?;
        Ok(self.gate.evaluate_snippet(fragment, label).await.into())
    }
}
