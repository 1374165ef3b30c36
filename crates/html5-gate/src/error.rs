//! Error types for html5-gate

use thiserror::Error;

/// Errors that can occur while gating markup on HTML5 validation
#[derive(Error, Debug)]
pub enum GateError {
    /// An assertion helper was called while validation is switched off
    #[error("Method {method}() can not be used as the HTML5 validation is disabled.")]
    Disabled { method: String },

    /// No validator endpoint configured
    #[error("HTML5 validator service URL is not configured")]
    ServiceNotConfigured,

    /// Ignore pattern failed to compile
    #[error("Invalid ignore pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Wrapper template without exactly one substitution point
    #[error("Invalid HTML5 wrapper: {0}")]
    InvalidWrapper(String),

    /// HTTP error talking to the validator
    #[error("HTTP error: {0}")]
    Http(String),

    /// Validator response could not be parsed
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        GateError::Http(err.to_string())
    }
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_message_names_method() {
        let err = GateError::Disabled {
            method: "assert_is_valid_html5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Method assert_is_valid_html5() can not be used as the HTML5 validation is disabled."
        );
    }
}
