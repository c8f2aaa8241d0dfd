//! Library error types.
//!
//! Ordinary validation failures are data (see [`crate::rule::Violation`] and
//! [`crate::outcome`]), never errors. `FormError` covers misuse of the API
//! surface only.

/// Errors returned by [`Form`](crate::Form) operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormError {
    /// The named field is not registered on this form.
    #[error("Field '{field}' is not registered")]
    UnknownField {
        /// The requested field name.
        field: String,
    },
}

impl FormError {
    /// Creates a new unknown-field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }
}
