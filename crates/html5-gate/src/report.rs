//! Failure report rendering.

use crate::message::ValidationMessage;

/// Label used when the caller does not name the validated document.
pub const DEFAULT_LABEL: &str = "html5";

/// Suffix the assertion layer appends after the report body.
pub const FAILED_ASSERTION_SUFFIX: &str = "Failed asserting that false is true.";

/// Render the report body for the surviving ERROR messages.
///
/// Every line, the header included, ends with `\n`. A message with empty
/// text is reported as `Empty error message about <context>`, the context
/// being its own extract, or failing that the extract of the previous
/// reported message.
pub fn render_report(label: &str, errors: &[&ValidationMessage]) -> String {
    let mut out = format!("HTML5 validation failed [{}]:\n", label);
    let mut previous_extract: Option<&str> = None;

    for message in errors {
        let extract = message.extract.as_deref();
        if message.text.is_empty() {
            let context = extract.or(previous_extract).unwrap_or("");
            out.push_str(&format!(
                "  Line {}: Empty error message about {}\n",
                message.line, context
            ));
        } else {
            out.push_str(&format!("  Line {}: {}\n", message.line, message.text));
        }
        if extract.is_some() {
            previous_extract = extract;
        }
    }

    out
}

/// Full assertion failure text: report body, blank line, fixed suffix.
pub fn assertion_failure_message(report: &str) -> String {
    format!("{}\n{}", report, FAILED_ASSERTION_SUFFIX)
}
