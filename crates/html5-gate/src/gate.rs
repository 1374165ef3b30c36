//! HTML5 validation gate.
//!
//! Decides whether a document passes, fails or has to be skipped:
//! - no configured endpoint, a failed liveness probe or a backend failure
//!   all yield [`ValidationOutcome::Skip`], so suites stay runnable offline
//! - ERROR messages that survive the ignore rules yield
//!   [`ValidationOutcome::Fail`] with a rendered report
//! - anything else is a [`ValidationOutcome::Pass`]
//!
//! Each evaluation makes at most one probe and one validation call, in that
//! order, with no retries.

use tracing::{debug, info, warn};

use crate::backend::ValidationBackend;
use crate::error::GateError;
use crate::ignore::IgnoreRules;
use crate::message::{ValidationMessage, ValidationOutcome, ValidationResult};
use crate::report::{render_report, DEFAULT_LABEL};
use crate::Result;

/// Substitution point in a wrapper template.
pub const CONTENT_PLACEHOLDER: &str = "<<CONTENT>>";

/// Minimal HTML5 document for validating bare fragments.
pub const DEFAULT_DOCUMENT_WRAPPER: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"UTF-8\" />
<title></title>
</head>
<body>
<<CONTENT>>
</body>
</html>
";

/// Gate over a [`ValidationBackend`].
pub struct ValidationGate<B> {
    backend: B,
    wrapper: Option<String>,
    ignores: IgnoreRules,
}

impl<B: ValidationBackend> ValidationGate<B> {
    /// Gate with no wrapper and no ignore rules.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            wrapper: None,
            ignores: IgnoreRules::none(),
        }
    }

    /// Replace the ignore rules used by [`evaluate`](Self::evaluate).
    pub fn with_ignores(mut self, ignores: IgnoreRules) -> Self {
        self.ignores = ignores;
        self
    }

    /// Set the wrapper template, builder style.
    pub fn with_wrapper(mut self, template: impl Into<String>) -> Result<Self> {
        self.set_wrapper(template)?;
        Ok(self)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn ignores(&self) -> &IgnoreRules {
        &self.ignores
    }

    /// Set the template fragments get embedded into before submission.
    ///
    /// The template must contain [`CONTENT_PLACEHOLDER`] exactly once.
    pub fn set_wrapper(&mut self, template: impl Into<String>) -> Result<()> {
        let template = template.into();
        let points = template.matches(CONTENT_PLACEHOLDER).count();
        if points != 1 {
            return Err(GateError::InvalidWrapper(format!(
                "expected exactly one {} substitution point, found {}",
                CONTENT_PLACEHOLDER, points
            )));
        }
        self.wrapper = Some(template);
        Ok(())
    }

    pub fn wrapper(&self) -> Option<&str> {
        self.wrapper.as_deref()
    }

    pub fn clear_wrapper(&mut self) {
        self.wrapper = None;
    }

    /// Embed `fragment` into the wrapper, or return it as-is without one.
    pub fn wrap(&self, fragment: &str) -> String {
        match &self.wrapper {
            Some(template) => template.replacen(CONTENT_PLACEHOLDER, fragment, 1),
            None => fragment.to_string(),
        }
    }

    /// Skip reason naming the configured endpoint.
    pub fn unavailable_reason(&self) -> String {
        format!(
            "HTML5 Validator service not found at '{}' !",
            self.backend.service_url().unwrap_or("")
        )
    }

    /// `false` straight away when no endpoint is configured, otherwise the
    /// backend's liveness probe.
    pub async fn check_availability(&self) -> bool {
        match self.backend.service_url() {
            None => {
                debug!("no HTML5 validator configured");
                false
            }
            Some(url) => {
                let available = self.backend.is_available().await;
                debug!(url, available, "HTML5 validator availability");
                available
            }
        }
    }

    /// Submit `html` to the backend. Callers check availability first.
    pub async fn validate(&self, html: &str) -> Result<ValidationResult> {
        self.backend.validate(html).await
    }

    /// Evaluate `html` with the gate's own ignore rules.
    pub async fn evaluate(&self, html: &str, label: Option<&str>) -> ValidationOutcome {
        self.evaluate_with(html, label, &self.ignores).await
    }

    /// Evaluate `html` with explicit ignore rules.
    pub async fn evaluate_with(
        &self,
        html: &str,
        label: Option<&str>,
        ignores: &IgnoreRules,
    ) -> ValidationOutcome {
        if !self.check_availability().await {
            let reason = self.unavailable_reason();
            info!(%reason, "skipping HTML5 validation");
            return ValidationOutcome::Skip { reason };
        }

        let result = match self.validate(html).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "HTML5 validator returned no verdict");
                return ValidationOutcome::Skip {
                    reason: self.unavailable_reason(),
                };
            }
        };

        let outcome = judge(&result, label, ignores);
        info!(
            label = label.unwrap_or(DEFAULT_LABEL),
            passed = outcome.is_pass(),
            "HTML5 validation verdict"
        );
        outcome
    }

    /// Like [`evaluate`](Self::evaluate), embedding the fragment into the
    /// wrapper first.
    pub async fn evaluate_snippet(&self, fragment: &str, label: Option<&str>) -> ValidationOutcome {
        self.evaluate(&self.wrap(fragment), label).await
    }

    /// Like [`evaluate_with`](Self::evaluate_with), embedding the fragment
    /// into the wrapper first.
    pub async fn evaluate_snippet_with(
        &self,
        fragment: &str,
        label: Option<&str>,
        ignores: &IgnoreRules,
    ) -> ValidationOutcome {
        self.evaluate_with(&self.wrap(fragment), label, ignores).await
    }
}

/// Turn a completed validation into a verdict.
pub fn judge(
    result: &ValidationResult,
    label: Option<&str>,
    ignores: &IgnoreRules,
) -> ValidationOutcome {
    let surviving: Vec<&ValidationMessage> = result
        .errors()
        .filter(|message| !ignores.suppresses(message))
        .collect();

    if surviving.is_empty() {
        return ValidationOutcome::Pass;
    }

    ValidationOutcome::Fail {
        rendered_report: render_report(label.unwrap_or(DEFAULT_LABEL), &surviving),
    }
}
