//! Aggregate validation and submission outcomes.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Information about a single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The field that failed validation.
    pub field: String,
    /// Rendered, human-readable error message.
    pub message: String,
}

impl FieldError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of validating one or more fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ValidationOutcome {
    /// All validated fields passed.
    #[default]
    Valid,
    /// One or more fields failed, in registration order.
    Invalid(Vec<FieldError>),
    /// A newer validation started while this one awaited a custom
    /// validator; its results were discarded and no state was written.
    Superseded,
}

impl ValidationOutcome {
    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Collect the errors as a field-name → message map.
    pub fn error_map(&self) -> BTreeMap<String, String> {
        self.errors()
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }
}

/// Terminal outcome of a [`Form::submit`](crate::Form::submit) call.
///
/// `Submitted` and `Rejected` are the two ordinary terminals: exactly one
/// of them occurs per completed submit, and each is paired with exactly one
/// emitted event. `Superseded` occurs only when an overlapping submit or
/// validation took over mid-call; it writes no state and emits nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Full-form validation passed.
    Submitted {
        /// Every registered field's value.
        values: BTreeMap<String, Value>,
    },
    /// Full-form validation failed.
    Rejected {
        /// Failing field name to rendered error message.
        errors: BTreeMap<String, String>,
    },
    /// A newer validation superseded this submit.
    Superseded,
}

impl SubmitOutcome {
    /// Check if the submit went through.
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}
