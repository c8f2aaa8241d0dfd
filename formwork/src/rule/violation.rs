//! The violation taxonomy and default message templates.

use std::time::Duration;

use super::TypeKind;

/// What kind of rule a value violated. Failures are data, not exceptions:
/// nothing here is ever thrown to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A required value was null or empty.
    Required,
    /// The value did not match the rule's regex.
    Pattern,
    /// The value did not have the expected shape.
    Type(TypeKind),
    /// The value's length or numeric value fell outside the bounds.
    Range {
        /// Lower bound, if the rule had one.
        min: Option<f64>,
        /// Upper bound, if the rule had one.
        max: Option<f64>,
    },
    /// A custom validator did not complete within the configured timeout.
    Timeout(Duration),
    /// A custom validator resolved to `false`, or errored with the carried
    /// message.
    Custom(Option<String>),
}

impl Violation {
    /// Render the default template for this violation.
    ///
    /// `field` is the display name the caller substitutes in.
    pub fn default_message(&self, field: &str) -> String {
        match self {
            Violation::Required => format!("{field} is required"),
            Violation::Pattern => format!("{field} does not match the required pattern"),
            Violation::Type(kind) => format!("please enter a valid {}", kind.name()),
            Violation::Range {
                min: Some(min),
                max: Some(max),
            } => format!("{field} must be between {min} and {max}"),
            Violation::Range {
                min: Some(min),
                max: None,
            } => format!("{field} must be at least {min}"),
            Violation::Range {
                min: None,
                max: Some(max),
            } => format!("{field} must be at most {max}"),
            Violation::Range {
                min: None,
                max: None,
            } => format!("{field} is out of range"),
            Violation::Timeout(limit) => {
                format!("{field} validation timed out after {limit:?}")
            }
            Violation::Custom(Some(message)) => message.clone(),
            Violation::Custom(None) => format!("{field} failed validation"),
        }
    }
}

/// One rule failure: the violation plus the rule's message override.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    /// Which rule kind failed.
    pub violation: Violation,
    override_message: Option<String>,
}

impl RuleFailure {
    pub(crate) fn new(violation: Violation, override_message: Option<String>) -> Self {
        Self {
            violation,
            override_message,
        }
    }

    /// Render the failure message for the given field name.
    ///
    /// A rule-supplied message override wins; otherwise the violation's
    /// default template is used.
    pub fn message(&self, field: &str) -> String {
        match &self.override_message {
            Some(message) => message.clone(),
            None => self.violation.default_message(field),
        }
    }
}
