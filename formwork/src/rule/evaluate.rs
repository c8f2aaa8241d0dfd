//! The rule evaluation loop.

use std::time::Duration;

use log::trace;
use serde_json::Value;

use super::definition::{Rule, TypeKind};
use super::violation::{RuleFailure, Violation};

/// Evaluate `rules` against `value` strictly in list order.
///
/// The first failing rule determines the returned failure and evaluation
/// stops; remaining rules are not run. Custom validators are awaited
/// uniformly whether their work is sync or async; when `timeout` is set,
/// each custom await is bounded by it and an overrun is reported as a
/// [`Violation::Timeout`] on that rule. A validator that errors is reported
/// as a [`Violation::Custom`] carrying its message rather than propagated.
///
/// Returns `None` when every rule passes.
pub async fn evaluate(
    value: &Value,
    rules: &[Rule],
    timeout: Option<Duration>,
) -> Option<RuleFailure> {
    for rule in rules {
        let violation = match rule {
            Rule::Required { .. } => check_required(value),
            Rule::Pattern { regex, .. } => {
                (!regex.is_match(&value_text(value))).then_some(Violation::Pattern)
            }
            Rule::Type { kind, .. } => check_type(value, *kind),
            Rule::Range { min, max, .. } => check_range(value, *min, *max),
            Rule::Custom { validate, .. } => {
                let fut = validate(value.clone());
                let resolved = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, fut).await {
                        Ok(resolved) => resolved,
                        Err(_) => {
                            trace!("custom validator exceeded {limit:?}");
                            return Some(RuleFailure::new(
                                Violation::Timeout(limit),
                                rule.message().map(String::from),
                            ));
                        }
                    },
                    None => fut.await,
                };
                match resolved {
                    Ok(true) => None,
                    Ok(false) => Some(Violation::Custom(None)),
                    Err(message) => Some(Violation::Custom(Some(message))),
                }
            }
        };

        if let Some(violation) = violation {
            return Some(RuleFailure::new(
                violation,
                rule.message().map(String::from),
            ));
        }
    }

    None
}

fn check_required(value: &Value) -> Option<Violation> {
    let empty = match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    empty.then_some(Violation::Required)
}

fn check_type(value: &Value, kind: TypeKind) -> Option<Violation> {
    let ok = match kind {
        TypeKind::Email => email_address::EmailAddress::is_valid(&value_text(value)),
        TypeKind::Url => url::Url::parse(&value_text(value)).is_ok(),
        TypeKind::Number => match value {
            Value::Number(_) => true,
            Value::String(s) => s.parse::<f64>().is_ok_and(f64::is_finite),
            _ => false,
        },
    };
    (!ok).then_some(Violation::Type(kind))
}

fn check_range(value: &Value, min: Option<f64>, max: Option<f64>) -> Option<Violation> {
    let out_of_range = match measure(value) {
        Some(measured) => {
            min.is_some_and(|min| measured < min) || max.is_some_and(|max| measured > max)
        }
        // Values with no length or numeric interpretation never satisfy
        // the bounds.
        None => true,
    };
    out_of_range.then_some(Violation::Range { min, max })
}

/// The quantity a `Range` rule bounds: numeric value for numbers, length
/// in characters for strings, element count for arrays.
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}

/// Text form of a value for pattern and shape checks. Strings are used
/// as-is, null is empty, everything else is its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_value_text_forms() {
        assert_eq!(value_text(&json!("abc")), "abc");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&Value::Null), "");
    }

    #[test]
    fn test_measure_picks_length_or_magnitude() {
        assert_eq!(measure(&json!(7.5)), Some(7.5));
        assert_eq!(measure(&json!("héllo")), Some(5.0));
        assert_eq!(measure(&json!([1, 2, 3])), Some(3.0));
        assert_eq!(measure(&json!({"a": 1})), None);
        assert_eq!(measure(&Value::Null), None);
    }

    #[test]
    fn test_required_empty_shapes() {
        assert_eq!(check_required(&Value::Null), Some(Violation::Required));
        assert_eq!(check_required(&json!("")), Some(Violation::Required));
        assert_eq!(check_required(&json!("x")), None);
        assert_eq!(check_required(&json!(0)), None);
        assert_eq!(check_required(&json!(false)), None);
    }

    #[test]
    fn test_number_type_check() {
        assert_eq!(check_type(&json!(3.25), TypeKind::Number), None);
        assert_eq!(check_type(&json!("12e3"), TypeKind::Number), None);
        assert_eq!(
            check_type(&json!("twelve"), TypeKind::Number),
            Some(Violation::Type(TypeKind::Number))
        );
        assert_eq!(
            check_type(&json!(true), TypeKind::Number),
            Some(Violation::Type(TypeKind::Number))
        );
    }
}
