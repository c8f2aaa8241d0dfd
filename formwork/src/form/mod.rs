//! The form: field registry, validation orchestrator, and submission
//! coordinator behind one cheaply cloneable handle.
//!
//! `Form` wraps its state in `Arc<RwLock<..>>`, so clones share one field
//! registry and the handle can be passed to input adapters and async tasks
//! alike. Locks are never held across an await: validation clones the
//! value and rules out, evaluates, then re-takes the lock to write the
//! result back, discarding it if a newer validation started in between.

mod registry;
mod submit;
mod validate;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use log::trace;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::event::{EventReceiver, EventSender, FormEvent};
use crate::field::Field;

/// Form construction options.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Initial values, keyed by field name. Each entry also registers a
    /// rule-less field at construction; `reset_fields` restores to these.
    pub initial_values: HashMap<String, Value>,

    /// If true, unregistering a field keeps its stored value for a later
    /// remount. If false, unregistration deletes the entry.
    pub preserve: bool,

    /// Upper bound on each custom validator await. None means validators
    /// may suspend indefinitely.
    pub validate_timeout: Option<Duration>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            initial_values: HashMap::new(),
            preserve: true,
            validate_timeout: None,
        }
    }
}

impl FormConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one initial value.
    pub fn initial_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.initial_values.insert(name.into(), value);
        self
    }

    /// Set all initial values at once.
    pub fn initial_values(mut self, values: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.initial_values = values.into_iter().collect();
        self
    }

    /// Set the preserve-on-unregister flag.
    pub fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    /// Bound each custom validator await by `limit`.
    pub fn validate_timeout(mut self, limit: Duration) -> Self {
        self.validate_timeout = Some(limit);
        self
    }
}

/// Shared form state. Exclusively owned by one `Form` (and its clones);
/// never shared across distinct forms.
pub(crate) struct FormInner {
    /// Registered fields in registration order. Names are unique.
    pub(crate) fields: Vec<Field>,
    /// Names that received at least one explicit value change since
    /// registration or last reset. Always a subset of the field names.
    pub(crate) touched: HashSet<String>,
    pub(crate) initial_values: HashMap<String, Value>,
    pub(crate) preserve: bool,
    pub(crate) validate_timeout: Option<Duration>,
}

impl FormInner {
    pub(crate) fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub(crate) fn values_snapshot(&self) -> BTreeMap<String, Value> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

/// A form instance: the field registry plus its validation and submission
/// lifecycle.
///
/// Cloning is cheap and clones share state, so a `Form` can be handed to
/// each input adapter and to the submit path simultaneously.
#[derive(Clone)]
pub struct Form {
    inner: Arc<RwLock<FormInner>>,
    /// Monotonic validation generation. Bumped at the start of every
    /// validation; a run that observes a newer generation after an await
    /// discards its results.
    generation: Arc<AtomicU64>,
    subscribers: Arc<Mutex<Vec<EventSender>>>,
}

impl Form {
    /// Create a form with default options.
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    /// Create a form from a config. Every `initial_values` entry registers
    /// a rule-less field up front.
    pub fn with_config(config: FormConfig) -> Self {
        let fields = config
            .initial_values
            .iter()
            .map(|(name, value)| Field::implicit(name.clone(), value.clone()))
            .collect();

        Self {
            inner: Arc::new(RwLock::new(FormInner {
                fields,
                touched: HashSet::new(),
                initial_values: config.initial_values,
                preserve: config.preserve,
                validate_timeout: config.validate_timeout,
            })),
            generation: Arc::new(AtomicU64::new(0)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe to this form's notifications.
    ///
    /// The receiver sees every event emitted after this call, in emission
    /// order. Dropping the receiver ends the subscription.
    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);
        rx
    }

    pub(crate) fn publish(&self, event: FormEvent) {
        trace!("publishing {event:?}");
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, FormInner> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, FormInner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a new validation generation and return it.
    pub(crate) fn begin_validation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The latest started validation generation.
    pub(crate) fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}
