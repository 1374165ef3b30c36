//! HTML5 validation settings.
//!
//! Loaded from a JSON document or from `HTML5_*` environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GateError;
use crate::http::{HttpBackendConfig, DEFAULT_SERVICE_URL};
use crate::ignore::IgnoreRules;
use crate::Result;

/// Validation settings shared by the assertion helpers and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Html5ValidationConfig {
    /// Whether the assertion helpers may be used at all
    pub enabled: bool,
    /// Validator endpoint; `None` disables the service (tests get skipped)
    pub url: Option<String>,
    /// Patterns matched against the message text
    pub ignores: Vec<String>,
    /// Patterns matched against the extract
    pub ignores_extract: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Html5ValidationConfig {
    fn default() -> Self {
        Html5ValidationConfig {
            enabled: false,
            url: Some(DEFAULT_SERVICE_URL.to_string()),
            ignores: Vec::new(),
            ignores_extract: Vec::new(),
            timeout_secs: 10,
        }
    }
}

impl Html5ValidationConfig {
    /// Read settings from the environment, keeping defaults for unset keys
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("HTML5_VALIDATION_ENABLED") {
            config.enabled = parse_bool(&value).ok_or_else(|| {
                GateError::Config(format!("HTML5_VALIDATION_ENABLED: not a boolean: {}", value))
            })?;
        }
        if let Some(value) = lookup("HTML5_VALIDATOR_URL") {
            let value = value.trim();
            config.url = (!value.is_empty()).then(|| value.to_string());
        }
        if let Some(value) = lookup("HTML5_VALIDATION_IGNORES") {
            config.ignores = split_lines(&value);
        }
        if let Some(value) = lookup("HTML5_VALIDATION_IGNORES_EXTRACT") {
            config.ignores_extract = split_lines(&value);
        }
        if let Some(value) = lookup("HTML5_VALIDATOR_TIMEOUT_SECS") {
            config.timeout_secs = value.trim().parse().map_err(|_| {
                GateError::Config(format!("HTML5_VALIDATOR_TIMEOUT_SECS: not a number: {}", value))
            })?;
        }

        Ok(config)
    }

    /// Load settings from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Compile both ignore lists
    pub fn ignore_rules(&self) -> Result<IgnoreRules> {
        IgnoreRules::new(self.ignores.as_slice(), self.ignores_extract.as_slice())
    }

    /// Transport settings for [`crate::HttpBackend`]
    pub fn backend_config(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            service_url: self.url.clone(),
            ..HttpBackendConfig::default()
        }
        .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn split_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
