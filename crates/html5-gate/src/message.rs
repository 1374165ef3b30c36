//! Validator messages and results.
//!
//! The shapes follow the JSON output of the Nu HTML checker (`?out=json`):
//! a `messages` array whose entries carry `type`, `message`, `lastLine` and
//! an optional `extract`.

use serde::{Deserialize, Serialize};

/// Severity of a validator message. Only `Error` affects the verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    /// `info`, `non-document-error` and anything else the service reports.
    #[default]
    #[serde(other)]
    Other,
}

/// One issue reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    #[serde(rename = "type", default)]
    pub severity: Severity,

    /// Human-readable message; may be empty.
    #[serde(rename = "message", default)]
    pub text: String,

    /// 1-based source line within the submitted HTML.
    #[serde(rename = "lastLine", default = "first_line")]
    pub line: u32,

    /// Code snippet the message refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
}

fn first_line() -> u32 {
    1
}

impl ValidationMessage {
    /// An ERROR-severity message without an extract.
    pub fn error(text: impl Into<String>, line: u32) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
            line: line.max(1),
            extract: None,
        }
    }

    /// A non-error message (info, warning...).
    pub fn other(text: impl Into<String>, line: u32) -> Self {
        Self {
            severity: Severity::Other,
            ..Self::error(text, line)
        }
    }

    /// Attach an extract.
    pub fn with_extract(mut self, extract: impl Into<String>) -> Self {
        self.extract = Some(extract.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Outcome of one validation call, in the order the backend reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    pub fn new(messages: Vec<ValidationMessage>) -> Self {
        Self { messages }
    }

    /// ERROR-severity messages in report order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.is_error())
    }

    /// True when no ERROR-severity message is present.
    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// What the gate decided for one piece of markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Pass,
    Fail { rendered_report: String },
    Skip { reason: String },
}

impl ValidationOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationOutcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, ValidationOutcome::Fail { .. })
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, ValidationOutcome::Skip { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_checker_json() {
        let body = r#"{
            "url": "",
            "messages": [
                {"type": "error", "lastLine": 3, "message": "Stray end tag div.", "extract": "</div>"},
                {"type": "info", "subType": "warning", "lastLine": 1, "message": "Consider adding a lang attribute."},
                {"type": "non-document-error", "message": "IO error"}
            ]
        }"#;

        let result: ValidationResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.messages.len(), 3);
        assert_eq!(
            result.messages[0],
            ValidationMessage::error("Stray end tag div.", 3).with_extract("</div>")
        );
        assert_eq!(result.messages[1].severity, Severity::Other);
        assert_eq!(result.messages[2].severity, Severity::Other);
        assert_eq!(result.messages[2].line, 1);
        assert_eq!(result.errors().count(), 1);
    }

    #[test]
    fn test_missing_fields_default() {
        let result: ValidationResult = serde_json::from_str("{}").unwrap();
        assert!(result.messages.is_empty());
        assert!(result.is_clean());

        let msg: ValidationMessage = serde_json::from_str(r#"{"type": "error"}"#).unwrap();
        assert!(msg.is_error());
        assert!(msg.text.is_empty());
        assert_eq!(msg.extract, None);
    }

    #[test]
    fn test_only_other_messages_is_clean() {
        let result = ValidationResult::new(vec![ValidationMessage::other("hint", 2)]);
        assert!(result.is_clean());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_value(ValidationOutcome::Skip {
            reason: "down".to_string(),
        })
        .unwrap();
        assert_eq!(json["outcome"], "skip");
        assert_eq!(json["reason"], "down");
    }
}
