//! Tests for the validation orchestrator: per-field validation, full-form
//! aggregation, sequencing, and the superseded-generation guard.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use formwork::prelude::*;
use serde_json::{Value, json};

fn email_form(value: Value) -> Form {
    let form = Form::new();
    form.register_field(
        "email",
        Some(value),
        vec![Rule::required(), Rule::email()],
    );
    form
}

#[tokio::test]
async fn test_validate_field_writes_error_back() {
    let form = email_form(json!(""));
    assert!(!form.validate_field("email").await.unwrap());
    assert_eq!(
        form.get_field_error("email"),
        Some("email is required".to_string())
    );

    form.set_field_value("email", json!("not-an-email"));
    assert!(!form.validate_field("email").await.unwrap());
    assert_eq!(
        form.get_field_error("email"),
        Some("please enter a valid email".to_string())
    );

    form.set_field_value("email", json!("user@example.com"));
    assert!(form.validate_field("email").await.unwrap());
    assert_eq!(form.get_field_error("email"), None);
}

#[tokio::test]
async fn test_validate_field_unknown_name_is_an_error() {
    let form = Form::new();
    let err = form.validate_field("ghost").await.unwrap_err();
    assert!(matches!(err, FormError::UnknownField { .. }));
    assert_eq!(err.to_string(), "Field 'ghost' is not registered");
}

#[tokio::test]
async fn test_validate_fields_aggregates_only_failures() {
    let form = Form::new();
    form.register_field("a", Some(json!("ok")), vec![Rule::required()]);
    form.register_field("b", Some(json!("")), vec![Rule::required()]);

    let outcome = form.validate_fields(None).await.unwrap();
    assert!(!outcome.is_valid());

    let errors = outcome.error_map();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["b"], "b is required");
    assert!(!errors.contains_key("a"));

    // The passing field carries no error, the failing one does.
    assert_eq!(form.get_field_error("a"), None);
    assert!(form.get_field_error("b").is_some());
}

#[tokio::test]
async fn test_validate_fields_all_valid() {
    let form = Form::new();
    form.register_field("a", Some(json!(1)), vec![Rule::number()]);
    form.register_field("b", Some(json!("x")), vec![Rule::required()]);

    let outcome = form.validate_fields(None).await.unwrap();
    assert_eq!(outcome, ValidationOutcome::Valid);
    assert!(outcome.errors().is_empty());
    assert!(outcome.first_error().is_none());
}

#[tokio::test]
async fn test_validate_fields_subset_and_unknown_target() {
    let form = Form::new();
    form.register_field("a", Some(json!("")), vec![Rule::required()]);
    form.register_field("b", Some(json!("")), vec![Rule::required()]);

    let outcome = form.validate_fields(Some(&["b"])).await.unwrap();
    assert_eq!(outcome.errors().len(), 1);
    assert_eq!(outcome.errors()[0].field, "b");
    // Untargeted fields are untouched by the pass.
    assert_eq!(form.get_field_error("a"), None);

    assert!(form.validate_fields(Some(&["a", "ghost"])).await.is_err());
}

#[tokio::test]
async fn test_fields_validate_sequentially_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let form = Form::new();

    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        form.register_field(
            name,
            Some(json!(name)),
            vec![Rule::custom_async(move |_: Value| {
                let order = Arc::clone(&order);
                async move {
                    // Yield so overlap would be observable if fields ran
                    // concurrently.
                    tokio::task::yield_now().await;
                    order.lock().unwrap().push(name);
                    true
                }
            })],
        );
    }

    let outcome = form.validate_fields(None).await.unwrap();
    assert!(outcome.is_valid());
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_errors_reported_in_registration_order() {
    let form = Form::new();
    form.register_field("z_last", Some(json!("")), vec![Rule::required()]);
    form.register_field("a_first", Some(json!("")), vec![Rule::required()]);

    let outcome = form.validate_fields(None).await.unwrap();
    let fields: Vec<_> = outcome.errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["z_last", "a_first"]);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_applies_through_form_config() {
    let form = Form::with_config(FormConfig::new().validate_timeout(Duration::from_millis(50)));
    form.register_field(
        "slow",
        Some(json!("x")),
        vec![Rule::custom_async(|_: Value| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            true
        })],
    );

    assert!(!form.validate_field("slow").await.unwrap());
    assert_eq!(
        form.get_field_error("slow"),
        Some("slow validation timed out after 50ms".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_newer_validation_supersedes_pending_one() {
    let form = Form::new();
    form.register_field(
        "slow",
        Some(json!("")),
        vec![Rule::custom_async(|_: Value| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            true
        })],
    );
    form.register_field("plain", Some(json!("x")), vec![Rule::required()]);

    let first = form.validate_fields(None);
    let second = {
        let form = form.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            form.validate_field("plain").await
        }
    };

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap(), ValidationOutcome::Superseded);
    assert!(second.unwrap());
}
