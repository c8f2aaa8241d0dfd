//! Outbound form notifications.
//!
//! The engine emits events rather than calling back into rendering code:
//! widgets and host pages subscribe via [`Form::subscribe`](crate::Form::subscribe)
//! and receive every subsequent notification in emission order.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

/// Sending half of a form event subscription.
pub type EventSender = mpsc::UnboundedSender<FormEvent>;

/// Receiving half of a form event subscription.
pub type EventReceiver = mpsc::UnboundedReceiver<FormEvent>;

/// A notification emitted by a [`Form`](crate::Form).
#[derive(Debug, Clone, Serialize)]
pub enum FormEvent {
    /// A field's value changed. Emitted once per `set_field_value` call,
    /// including each entry of a `set_fields_value` batch.
    ValuesChange {
        /// Snapshot of every registered field's value.
        values: BTreeMap<String, Value>,
        /// The single changed key/value pair.
        changed_values: BTreeMap<String, Value>,
    },
    /// A submit passed full-form validation.
    Submit {
        /// Every registered field's value at submit time.
        values: BTreeMap<String, Value>,
    },
    /// A submit failed full-form validation.
    SubmitFailed {
        /// Failing field name to rendered error message.
        errors: BTreeMap<String, String>,
    },
}
