//! Tests for the submission coordinator: terminal outcomes, event
//! exclusivity, and reset semantics.

use std::time::Duration;

use formwork::prelude::*;
use serde_json::{Value, json};

fn signup_form() -> Form {
    let form = Form::with_config(FormConfig::new().initial_value("email", json!("a@b.io")));
    form.register_field("email", None, vec![Rule::required(), Rule::email()]);
    form.register_field("name", Some(json!("Norah")), vec![Rule::required()]);
    form
}

#[tokio::test]
async fn test_submit_valid_form_emits_exactly_one_submit_event() {
    let form = signup_form();
    let mut events = form.subscribe();

    let outcome = form.submit().await;
    let SubmitOutcome::Submitted { values } = outcome else {
        panic!("expected Submitted, got {outcome:?}");
    };
    assert_eq!(values, form.get_fields_value(None));

    match events.try_recv().unwrap() {
        FormEvent::Submit { values: emitted } => assert_eq!(emitted, values),
        other => panic!("expected Submit, got {other:?}"),
    }
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_submit_invalid_form_emits_exactly_one_failure_event() {
    let form = signup_form();
    form.set_field_value("email", json!("not-an-email"));
    let mut events = form.subscribe();

    let outcome = form.submit().await;
    let SubmitOutcome::Rejected { errors } = outcome else {
        panic!("expected Rejected, got {outcome:?}");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["email"], "please enter a valid email");

    match events.try_recv().unwrap() {
        FormEvent::SubmitFailed { errors: emitted } => assert_eq!(emitted, errors),
        other => panic!("expected SubmitFailed, got {other:?}"),
    }
    assert!(events.try_recv().is_err());

    // The form stays interactive, invalid value retained for correction.
    assert_eq!(form.get_field_value("email"), Some(json!("not-an-email")));
    assert!(form.get_field_error("email").is_some());
}

#[tokio::test]
async fn test_failed_submit_then_correction_succeeds() {
    let form = signup_form();
    form.set_field_value("email", json!(""));

    assert!(!form.submit().await.is_submitted());

    form.set_field_value("email", json!("user@example.com"));
    assert!(form.submit().await.is_submitted());
}

#[tokio::test]
async fn test_reset_fields_restores_initial_state() {
    let form = signup_form();
    form.set_field_value("email", json!("broken"));
    form.set_field_value("name", json!("Someone"));
    assert!(!form.validate_field("email").await.unwrap());

    form.reset_fields(Some(&["email"]));

    // Reset target: initial value restored, error cleared, untouched.
    assert_eq!(form.get_field_value("email"), Some(json!("a@b.io")));
    assert_eq!(form.get_field_error("email"), None);
    assert!(!form.is_field_touched("email"));

    // Other fields unaffected.
    assert_eq!(form.get_field_value("name"), Some(json!("Someone")));
    assert!(form.is_field_touched("name"));
}

#[tokio::test]
async fn test_reset_without_initial_value_restores_null() {
    let form = Form::new();
    form.register_field("note", Some(json!("draft")), vec![]);
    form.set_field_value("note", json!("edited"));

    form.reset_fields(None);

    assert_eq!(form.get_field_value("note"), Some(Value::Null));
    assert!(!form.is_field_touched("note"));
}

#[tokio::test]
async fn test_reset_does_not_revalidate() {
    let form = Form::new();
    form.register_field("name", None, vec![Rule::required()]);
    assert!(!form.validate_field("name").await.unwrap());

    form.reset_fields(None);

    // Initial value is null, which would fail Required, but reset never
    // re-runs validation.
    assert_eq!(form.get_field_error("name"), None);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_submit_emits_no_event() {
    let form = Form::new();
    form.register_field(
        "slow",
        Some(json!("x")),
        vec![Rule::custom_async(|_: Value| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            true
        })],
    );
    let mut events = form.subscribe();

    let first = form.submit();
    let second = {
        let form = form.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            form.submit().await
        }
    };

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first, SubmitOutcome::Superseded);
    assert!(second.is_submitted());

    // Exactly one Submit event: the superseded run emitted nothing.
    assert!(matches!(
        events.try_recv().unwrap(),
        FormEvent::Submit { .. }
    ));
    assert!(events.try_recv().is_err());
}
