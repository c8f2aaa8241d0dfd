//! Signup Form Example
//!
//! A demo wiring the form engine end to end:
//! - Field registration with built-in and custom rules
//! - Change notifications via subscribe()
//! - A failed submit, a correction, and a successful submit

use std::fs::File;
use std::time::Duration;

use formwork::prelude::*;
use log::LevelFilter;
use serde_json::{Value, json};
use simplelog::{Config, WriteLogger};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create("signup.log").unwrap(),
    )
    .unwrap();

    let form = Form::with_config(
        FormConfig::new()
            .initial_value("newsletter", json!(false))
            .validate_timeout(Duration::from_secs(5)),
    );

    form.register_field(
        "username",
        None,
        vec![
            Rule::required(),
            Rule::range(3.0, 20.0).with_message("username must be 3-20 characters"),
            Rule::custom_async(|value: Value| async move {
                // Stand-in for an availability lookup against a backend.
                value.as_str() != Some("admin")
            }),
        ],
    );
    form.register_field("email", None, vec![Rule::required(), Rule::email()]);
    form.register_field("website", None, vec![Rule::url()]);
    form.register_field("age", None, vec![Rule::number(), Rule::min(13.0)]);

    let mut events = form.subscribe();

    // First attempt: three of four fields invalid.
    form.set_field_value("username", json!("ed"));
    form.set_field_value("email", json!("ed.example.com"));
    form.set_field_value("website", json!("https://example.com"));
    form.set_field_value("age", json!("12"));

    match form.submit().await {
        SubmitOutcome::Rejected { errors } => {
            println!("submit rejected:");
            for (field, message) in &errors {
                println!("  {field}: {message}");
            }
        }
        other => println!("unexpected outcome: {other:?}"),
    }

    // Correct the values and retry.
    form.set_fields_value([
        ("username".to_string(), json!("edgar")),
        ("email".to_string(), json!("edgar@example.com")),
        ("age".to_string(), json!(34)),
    ]);

    match form.submit().await {
        SubmitOutcome::Submitted { values } => {
            println!("submitted: {}", serde_json::to_string_pretty(&values).unwrap());
        }
        other => println!("unexpected outcome: {other:?}"),
    }

    // Drain the notification stream to show what listeners observed.
    let mut counts = (0, 0, 0);
    while let Ok(event) = events.try_recv() {
        match event {
            FormEvent::ValuesChange { .. } => counts.0 += 1,
            FormEvent::Submit { .. } => counts.1 += 1,
            FormEvent::SubmitFailed { .. } => counts.2 += 1,
        }
    }
    println!(
        "observed {} value change(s), {} submit(s), {} failure(s)",
        counts.0, counts.1, counts.2
    );
}
