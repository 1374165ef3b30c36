//! In-memory fake backend (testing only)
//!
//! `FakeBackend` answers with a scripted availability and validation response,
//! and records every probe and submission so tests can check what the gate
//! actually sent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::ValidationBackend;
use crate::error::GateError;
use crate::message::{ValidationMessage, ValidationResult};
use crate::Result;

/// Scripted reply to `validate`.
#[derive(Debug, Clone)]
enum Reply {
    Result(ValidationResult),
    Failure(String),
}

/// Scripted backend with call recording.
#[derive(Debug)]
pub struct FakeBackend {
    url: Option<String>,
    available: bool,
    reply: Reply,
    probes: AtomicUsize,
    submissions: Mutex<Vec<String>>,
}

impl FakeBackend {
    /// Available backend at `url` that reports no messages.
    pub fn new(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            available: true,
            reply: Reply::Result(ValidationResult::default()),
            probes: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Backend with no configured endpoint.
    pub fn unconfigured() -> Self {
        Self {
            url: None,
            ..Self::new("")
        }
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_messages(mut self, messages: Vec<ValidationMessage>) -> Self {
        self.reply = Reply::Result(ValidationResult::new(messages));
        self
    }

    /// Make `validate` fail as if the service could not produce a verdict.
    pub fn with_failure(mut self, reason: &str) -> Self {
        self.reply = Reply::Failure(reason.to_string());
        self
    }

    /// Number of liveness probes received.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    /// Payloads submitted to `validate`, in order.
    pub fn submissions(&self) -> Vec<String> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ValidationBackend for FakeBackend {
    fn service_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    async fn is_available(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.available
    }

    async fn validate(&self, html: &str) -> Result<ValidationResult> {
        self.submissions.lock().unwrap().push(html.to_string());
        match &self.reply {
            Reply::Result(result) => Ok(result.clone()),
            Reply::Failure(reason) => Err(GateError::Http(reason.clone())),
        }
    }
}
