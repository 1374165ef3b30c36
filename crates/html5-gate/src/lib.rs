//! html5-gate - HTML5 validation for functional test suites
//!
//! Submits rendered markup to an HTML5 validator service and turns the answer
//! into a test verdict:
//! - [`ValidationGate`]: pass / fail / skip decision over a [`ValidationBackend`]
//! - [`HttpBackend`]: Nu HTML checker compatible transport
//! - [`IgnoreRules`]: suppression of known-acceptable errors
//! - [`Html5Assertions`]: assertion helpers honouring the `enabled` switch
//!
//! An unreachable validator never fails a test; it is reported as a skip.

pub mod assertions;
pub mod backend;
pub mod config;
pub mod error;
pub mod fakes;
pub mod gate;
pub mod http;
pub mod ignore;
pub mod message;
pub mod report;

pub use assertions::{AssertionVerdict, Html5Assertions};
pub use backend::ValidationBackend;
pub use config::Html5ValidationConfig;
pub use error::{GateError, Result};
pub use gate::{judge, ValidationGate, CONTENT_PLACEHOLDER, DEFAULT_DOCUMENT_WRAPPER};
pub use http::{HttpBackend, HttpBackendConfig, DEFAULT_SERVICE_URL};
pub use ignore::{IgnorePattern, IgnoreRules};
pub use message::{Severity, ValidationMessage, ValidationOutcome, ValidationResult};
pub use report::{render_report, DEFAULT_LABEL, FAILED_ASSERTION_SUFFIX};

/// html5-gate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
