//! Gate behaviour against a scripted backend.

use html5_gate::fakes::FakeBackend;
use html5_gate::{
    AssertionVerdict, Html5Assertions, IgnoreRules, ValidationGate, ValidationMessage,
    ValidationOutcome, DEFAULT_DOCUMENT_WRAPPER,
};

fn fixture_messages() -> Vec<ValidationMessage> {
    vec![
        ValidationMessage::error("no", 1).with_extract("no"),
        ValidationMessage::error("", 2).with_extract("no"),
        ValidationMessage::error("foo", 3),
        ValidationMessage::error("bar", 4).with_extract("bar"),
    ]
}

#[tokio::test]
async fn test_empty_messages_pass() {
    let gate = ValidationGate::new(FakeBackend::new("http://localhost/"));
    assert_eq!(gate.evaluate("", None).await, ValidationOutcome::Pass);
}

#[tokio::test]
async fn test_unavailable_service_skips() {
    let gate = ValidationGate::new(FakeBackend::new("http://localhost/").with_available(false));

    let outcome = gate.evaluate("<p>", None).await;

    assert_eq!(
        outcome,
        ValidationOutcome::Skip {
            reason: "HTML5 Validator service not found at 'http://localhost/' !".to_string()
        }
    );
    assert!(gate.backend().submissions().is_empty());
}

#[tokio::test]
async fn test_backend_failure_skips_like_unavailability() {
    let gate = ValidationGate::new(
        FakeBackend::new("http://localhost/")
            .with_messages(fixture_messages())
            .with_failure("connection reset"),
    );

    assert_eq!(
        gate.evaluate("", None).await,
        ValidationOutcome::Skip {
            reason: "HTML5 Validator service not found at 'http://localhost/' !".to_string()
        }
    );
    assert_eq!(gate.backend().probe_count(), 1);
    assert_eq!(gate.backend().submissions().len(), 1);
}

#[tokio::test]
async fn test_ignored_errors_are_dropped_from_report() {
    let backend = FakeBackend::new("http://localhost/").with_messages(fixture_messages());
    let gate = ValidationGate::new(backend)
        .with_ignores(IgnoreRules::uniform(&["#foo#", "#bar#"]).unwrap());

    let outcome = gate.evaluate("", Some("baz")).await;

    assert_eq!(
        outcome,
        ValidationOutcome::Fail {
            rendered_report: concat!(
                "HTML5 validation failed [baz]:\n",
                "  Line 1: no\n",
                "  Line 2: Empty error message about no\n",
            )
            .to_string()
        }
    );
}

#[tokio::test]
async fn test_separate_text_and_extract_lists() {
    let backend = FakeBackend::new("http://localhost/").with_messages(fixture_messages());
    let gate = ValidationGate::new(backend)
        .with_ignores(IgnoreRules::new(&["#foo#"], &["#bar#"]).unwrap());
    let helper = Html5Assertions::new(gate, true);

    let verdict = helper.assert_is_valid_html5("", Some("baz")).await.unwrap();

    let expected = "HTML5 validation failed [baz]:
  Line 1: no
  Line 2: Empty error message about no

Failed asserting that false is true.";
    assert_eq!(
        verdict,
        AssertionVerdict::Failed {
            message: expected.to_string()
        }
    );
}

#[tokio::test]
async fn test_explicit_ignores_override_gate_rules() {
    let gate = ValidationGate::new(
        FakeBackend::new("http://localhost/")
            .with_messages(vec![ValidationMessage::error("Duplicate ID nav.", 12)]),
    )
    .with_ignores(IgnoreRules::uniform(&["#duplicate id#"]).unwrap());

    assert!(gate.evaluate("", None).await.is_pass());
    assert!(gate
        .evaluate_with("", None, &IgnoreRules::none())
        .await
        .is_fail());
}

#[tokio::test]
async fn test_snippet_without_wrapper_is_submitted_as_is() {
    let gate = ValidationGate::new(FakeBackend::new("http://localhost/"));

    let outcome = gate.evaluate_snippet("<p>Hello World!</p>", None).await;

    assert!(outcome.is_pass());
    assert_eq!(
        gate.backend().submissions(),
        vec!["<p>Hello World!</p>".to_string()]
    );
}

#[tokio::test]
async fn test_snippet_is_embedded_into_wrapper() {
    let mut gate = ValidationGate::new(FakeBackend::new("http://localhost/"));
    gate.set_wrapper("<main><<CONTENT>></main>").unwrap();

    gate.evaluate_snippet("<p>Hello</p>", None).await;
    gate.set_wrapper(DEFAULT_DOCUMENT_WRAPPER).unwrap();
    gate.evaluate_snippet("<p>Hello</p>", None).await;

    let submissions = gate.backend().submissions();
    assert_eq!(submissions[0], "<main><p>Hello</p></main>");
    assert_eq!(
        submissions[1],
        DEFAULT_DOCUMENT_WRAPPER.replace("<<CONTENT>>", "<p>Hello</p>")
    );
}

#[tokio::test]
async fn test_snippet_with_explicit_ignores() {
    let backend = FakeBackend::new("http://localhost/").with_messages(vec![
        ValidationMessage::error("Element “widget” not allowed here.", 9).with_extract("<widget>"),
    ]);
    let gate = ValidationGate::new(backend)
        .with_wrapper("<body><<CONTENT>></body>")
        .unwrap();

    let ignores = IgnoreRules::new(&[] as &[&str], &["#<widget>#"]).unwrap();
    let ignored = gate
        .evaluate_snippet_with("<widget></widget>", Some("w"), &ignores)
        .await;
    let strict = gate
        .evaluate_snippet_with("<widget></widget>", Some("w"), &IgnoreRules::none())
        .await;

    assert!(ignored.is_pass());
    assert_eq!(
        strict,
        ValidationOutcome::Fail {
            rendered_report:
                "HTML5 validation failed [w]:\n  Line 9: Element “widget” not allowed here.\n"
                    .to_string()
        }
    );
    assert_eq!(
        gate.backend().submissions(),
        vec![
            "<body><widget></widget></body>".to_string(),
            "<body><widget></widget></body>".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_snippet_failure() {
    let helper = Html5Assertions::new(
        ValidationGate::new(
            FakeBackend::new("http://localhost/")
                .with_messages(vec![ValidationMessage::error("foo", 1)]),
        ),
        true,
    );

    let verdict = helper
        .assert_is_valid_html5_snippet("<p>Hello World!</p>", None)
        .await
        .unwrap();
    assert!(matches!(verdict, AssertionVerdict::Failed { .. }));
}

#[tokio::test]
async fn test_skip_verdict_from_helper() {
    let helper = Html5Assertions::new(
        ValidationGate::new(FakeBackend::new("http://localhost/").with_available(false)),
        true,
    );

    assert_eq!(
        helper.assert_is_valid_html5("", None).await.unwrap(),
        AssertionVerdict::Skipped {
            reason: "HTML5 Validator service not found at 'http://localhost/' !".to_string()
        }
    );
}
