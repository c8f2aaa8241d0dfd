//! Field state.

use serde_json::Value;

use crate::rule::Rule;

/// One named, independently validatable unit of form state.
///
/// Fields are created on first registration and owned by exactly one
/// [`Form`](crate::Form). The error is present iff the most recent
/// validation of the field failed, and is cleared whenever the value
/// changes.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) value: Value,
    pub(crate) rules: Vec<Rule>,
    pub(crate) error: Option<String>,
    /// True for fields created implicitly from a form's initial values.
    /// The first explicit registration attaches its rules and clears this.
    pub(crate) placeholder: bool,
}

impl Field {
    pub(crate) fn new(name: impl Into<String>, value: Value, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            value,
            rules,
            error: None,
            placeholder: false,
        }
    }

    /// A rule-less field created from an `initial_values` entry at form
    /// construction, awaiting its explicit registration.
    pub(crate) fn implicit(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            rules: Vec::new(),
            error: None,
            placeholder: true,
        }
    }

    /// The field's unique name within its form.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The field's ordered rule list.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The current validation error, if the last validation failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
