//! Ignore rules for known-acceptable validator errors.
//!
//! Patterns are written the way they usually live in test configuration,
//! PCRE-style with delimiters (`#foo#`, `/data-[a-z]+/i`). The delimiters are
//! stripped, trailing flags are honoured, and matching is always
//! case-insensitive and unanchored. A pattern without recognisable delimiters
//! is compiled as a bare regex.

use regex::Regex;

use crate::error::GateError;
use crate::message::ValidationMessage;
use crate::Result;

/// A compiled ignore pattern that remembers how it was written.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    source: String,
    regex: Regex,
}

impl IgnorePattern {
    /// Compile a (possibly delimited) pattern.
    ///
    /// Empty patterns and unsupported trailing flags are rejected: the first
    /// would ignore every error, the second would never match.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| GateError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let (body, flags) = split_delimited(pattern).unwrap_or((pattern, ""));
        if body.trim().is_empty() {
            return Err(invalid("empty pattern matches every message".to_string()));
        }

        let mut inline = String::from("i");
        for flag in flags.chars() {
            match flag {
                'm' | 's' | 'x' | 'U' => inline.push(flag),
                // unicode is always on, `$` never matches before a final newline
                'i' | 'u' | 'D' => {}
                other => return Err(invalid(format!("unsupported flag '{}'", other))),
            }
        }

        let regex = Regex::new(&format!("(?{}){}", inline, body))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Splits `#body#flags` into `(body, flags)`. `None` when the pattern is not
/// delimited. Flags are any trailing ASCII letters; `parse` decides which
/// are supported.
fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let open = pattern.chars().next()?;
    if open.is_alphanumeric() || open.is_whitespace() || open == '\\' {
        return None;
    }
    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        c => c,
    };

    let rest = &pattern[open.len_utf8()..];
    let end = rest.rfind(close)?;
    let flags = &rest[end + close.len_utf8()..];
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((&rest[..end], flags))
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<IgnorePattern>> {
    patterns
        .iter()
        .map(|p| IgnorePattern::parse(p.as_ref()))
        .collect()
}

/// Message-text and extract patterns applied to ERROR messages.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    messages: Vec<IgnorePattern>,
    extracts: Vec<IgnorePattern>,
}

impl IgnoreRules {
    /// No suppression at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Separate lists for message text and extract.
    pub fn new<S: AsRef<str>, T: AsRef<str>>(messages: &[S], extracts: &[T]) -> Result<Self> {
        Ok(Self {
            messages: compile_all(messages)?,
            extracts: compile_all(extracts)?,
        })
    }

    /// One list applied to both the message text and the extract.
    pub fn uniform<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let compiled = compile_all(patterns)?;
        Ok(Self {
            messages: compiled.clone(),
            extracts: compiled,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.extracts.is_empty()
    }

    pub fn message_patterns(&self) -> &[IgnorePattern] {
        &self.messages
    }

    pub fn extract_patterns(&self) -> &[IgnorePattern] {
        &self.extracts
    }

    /// Whether `message` should be dropped from the verdict and the report.
    pub fn suppresses(&self, message: &ValidationMessage) -> bool {
        if self.messages.iter().any(|p| p.is_match(&message.text)) {
            return true;
        }
        match &message.extract {
            Some(extract) => self.extracts.iter().any(|p| p.is_match(extract)),
            None => false,
        }
    }
}
