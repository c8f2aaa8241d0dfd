//! Validation rules and the rule evaluator.
//!
//! A field carries an ordered list of [`Rule`]s. Evaluation walks the list in
//! order and stops at the first failing rule; the failure is reported as a
//! [`RuleFailure`] carrying the [`Violation`] taxonomy plus any per-rule
//! message override. Custom rules may be asynchronous and are awaited
//! uniformly.
//!
//! # Example
//!
//! ```ignore
//! use formwork::rule::{Rule, evaluate};
//! use serde_json::json;
//!
//! let rules = vec![
//!     Rule::required(),
//!     Rule::email().with_message("that does not look like an email"),
//! ];
//!
//! let failure = evaluate(&json!(""), &rules, None).await;
//! assert_eq!(failure.unwrap().message("email"), "email is required");
//! ```

mod definition;
mod evaluate;
mod violation;

pub use definition::{BoxFuture, CustomValidator, Rule, TypeKind};
pub use evaluate::evaluate;
pub use violation::{RuleFailure, Violation};
