//! formwork: form state, rule evaluation, and submission engine.
//!
//! A rendering-agnostic form engine: a registry of named fields, ordered
//! validation rules (sync and async), sequential validation with per-field
//! error aggregation, and a submit/reset lifecycle with data-only failure
//! semantics. Input widgets feed values in via [`Form::set_field_value`];
//! outcomes flow out as [`event::FormEvent`] notifications.
//!
//! # Example
//!
//! ```ignore
//! use formwork::prelude::*;
//! use serde_json::json;
//!
//! let form = Form::new();
//! form.register_field("email", None, vec![
//!     Rule::required(),
//!     Rule::email(),
//! ]);
//!
//! form.set_field_value("email", json!("user@example.com"));
//! match form.submit().await {
//!     SubmitOutcome::Submitted { values } => { /* persist values */ }
//!     SubmitOutcome::Rejected { errors } => { /* show errors */ }
//!     SubmitOutcome::Superseded => { /* a newer submit took over */ }
//! }
//! ```

pub mod error;
pub mod event;
pub mod field;
pub mod form;
pub mod outcome;
pub mod rule;

pub use form::{Form, FormConfig};

pub mod prelude {
    pub use crate::error::FormError;
    pub use crate::event::{EventReceiver, FormEvent};
    pub use crate::field::Field;
    pub use crate::form::{Form, FormConfig};
    pub use crate::outcome::{FieldError, SubmitOutcome, ValidationOutcome};
    pub use crate::rule::{Rule, RuleFailure, TypeKind, Violation};
}
