//! The closed rule sum type and its fluent constructors.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

pub use futures::future::BoxFuture;
use regex::Regex;
use serde_json::Value;

/// Type alias for custom validation closures.
///
/// The closure receives the field's current value and resolves to
/// `Ok(true)` on pass, `Ok(false)` on fail, or `Err(message)` when the
/// validator itself could not run (converted to a custom violation rather
/// than propagated, see the evaluator).
pub type CustomValidator = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<bool, String>> + Send + Sync>;

/// Value shape checked by [`Rule::Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A `local@domain` email address.
    Email,
    /// An absolute URL.
    Url,
    /// A finite number (numeric value, or a string that parses as one).
    Number,
}

impl TypeKind {
    /// Lowercase name used in default messages.
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Email => "email",
            TypeKind::Url => "url",
            TypeKind::Number => "number",
        }
    }
}

/// One validation rule attached to a field.
///
/// Rules form a closed sum: each variant carries exactly the data it needs,
/// and the evaluator matches exhaustively. Every variant accepts an optional
/// message override via [`Rule::with_message`].
#[derive(Clone)]
pub enum Rule {
    /// Fails when the value is null or the empty string.
    Required {
        /// Message override.
        message: Option<String>,
    },
    /// Fails when the value's text form does not match the regex.
    Pattern {
        /// Pattern the stringified value must match.
        regex: Regex,
        /// Message override.
        message: Option<String>,
    },
    /// Fails when the value does not have the given shape.
    Type {
        /// Expected shape.
        kind: TypeKind,
        /// Message override.
        message: Option<String>,
    },
    /// Fails when the value's length (strings/arrays) or numeric value
    /// falls outside `[min, max]`. Either bound is optional; both are
    /// inclusive.
    Range {
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
        /// Message override.
        message: Option<String>,
    },
    /// Fails when the validator resolves to `false` (or errors).
    Custom {
        /// The validator closure.
        validate: CustomValidator,
        /// Message override.
        message: Option<String>,
    },
}

impl Rule {
    /// Require a non-empty value.
    pub fn required() -> Self {
        Rule::Required { message: None }
    }

    /// Require the value's text form to match a regex.
    pub fn pattern(regex: Regex) -> Self {
        Rule::Pattern {
            regex,
            message: None,
        }
    }

    /// Require a valid email address.
    pub fn email() -> Self {
        Rule::Type {
            kind: TypeKind::Email,
            message: None,
        }
    }

    /// Require an absolute URL.
    pub fn url() -> Self {
        Rule::Type {
            kind: TypeKind::Url,
            message: None,
        }
    }

    /// Require a finite number.
    pub fn number() -> Self {
        Rule::Type {
            kind: TypeKind::Number,
            message: None,
        }
    }

    /// Require length or numeric value within `[min, max]` (inclusive).
    pub fn range(min: f64, max: f64) -> Self {
        Rule::Range {
            min: Some(min),
            max: Some(max),
            message: None,
        }
    }

    /// Require length or numeric value of at least `min`.
    pub fn min(min: f64) -> Self {
        Rule::Range {
            min: Some(min),
            max: None,
            message: None,
        }
    }

    /// Require length or numeric value of at most `max`.
    pub fn max(max: f64) -> Self {
        Rule::Range {
            min: None,
            max: Some(max),
            message: None,
        }
    }

    /// Add a custom synchronous validation rule.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Rule::Custom {
            validate: Arc::new(move |value| {
                let pass = f(&value);
                Box::pin(async move { Ok(pass) })
            }),
            message: None,
        }
    }

    /// Add a custom asynchronous validation rule.
    pub fn custom_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Rule::Custom {
            validate: Arc::new(move |value| {
                let fut = f(value);
                Box::pin(async move { Ok(fut.await) })
            }),
            message: None,
        }
    }

    /// Add a custom asynchronous rule whose validator may itself fail.
    ///
    /// An `Err(message)` from the validator is reported as that field's
    /// violation instead of propagating to the caller.
    pub fn custom_fallible<F, Fut>(f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, String>> + Send + 'static,
    {
        Rule::Custom {
            validate: Arc::new(move |value| Box::pin(f(value))),
            message: None,
        }
    }

    /// Override the rule's default message.
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        let slot = match &mut self {
            Rule::Required { message }
            | Rule::Pattern { message, .. }
            | Rule::Type { message, .. }
            | Rule::Range { message, .. }
            | Rule::Custom { message, .. } => message,
        };
        *slot = Some(msg.into());
        self
    }

    /// The rule's message override, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Rule::Required { message }
            | Rule::Pattern { message, .. }
            | Rule::Type { message, .. }
            | Rule::Range { message, .. }
            | Rule::Custom { message, .. } => message.as_deref(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required { message } => f
                .debug_struct("Required")
                .field("message", message)
                .finish(),
            Rule::Pattern { regex, message } => f
                .debug_struct("Pattern")
                .field("regex", &regex.as_str())
                .field("message", message)
                .finish(),
            Rule::Type { kind, message } => f
                .debug_struct("Type")
                .field("kind", kind)
                .field("message", message)
                .finish(),
            Rule::Range { min, max, message } => f
                .debug_struct("Range")
                .field("min", min)
                .field("max", max)
                .field("message", message)
                .finish(),
            Rule::Custom { message, .. } => f
                .debug_struct("Custom")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}
