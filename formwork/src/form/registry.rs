//! Field registry operations: register, unregister, value reads and writes.

use std::collections::BTreeMap;

use log::{debug, trace};
use serde_json::Value;

use super::Form;
use crate::event::FormEvent;
use crate::field::Field;
use crate::rule::Rule;

impl Form {
    /// Register a field.
    ///
    /// No-op if `name` is already explicitly registered (re-registration
    /// keeps the existing value, rules, and error). A field created
    /// implicitly from the form's initial values is upgraded instead: this
    /// call attaches its rules while the stored value stays in place. For a
    /// new field, the initial value is the explicit argument, falling back
    /// to the form's initial values, then to null.
    pub fn register_field(
        &self,
        name: impl Into<String>,
        initial_value: Option<Value>,
        rules: Vec<Rule>,
    ) {
        let name = name.into();
        let mut inner = self.write();
        if let Some(field) = inner.field_mut(&name) {
            if field.placeholder {
                debug!(
                    "register_field: attaching {} rule(s) to implicit field '{name}'",
                    rules.len()
                );
                field.rules = rules;
                field.placeholder = false;
            } else {
                trace!("register_field: '{name}' already registered, keeping existing entry");
            }
            return;
        }

        let value = initial_value
            .or_else(|| inner.initial_values.get(&name).cloned())
            .unwrap_or(Value::Null);
        debug!("register_field: '{name}' with {} rule(s)", rules.len());
        inner.fields.push(Field::new(name, value, rules));
    }

    /// Unregister a field.
    ///
    /// When the form's preserve flag is set (the default), the entry is
    /// kept so a remounted widget finds its value again; otherwise it is
    /// deleted along with its touched mark.
    pub fn unregister_field(&self, name: &str) {
        let mut inner = self.write();
        if inner.preserve {
            trace!("unregister_field: preserving '{name}'");
            return;
        }
        debug!("unregister_field: removing '{name}'");
        inner.fields.retain(|f| f.name != name);
        inner.touched.remove(name);
    }

    /// Set one field's value.
    ///
    /// No-op if `name` is unknown. Otherwise the value is stored, the
    /// field's stale error cleared, the field marked touched, and one
    /// [`FormEvent::ValuesChange`] emitted carrying the full value snapshot
    /// plus the changed pair.
    pub fn set_field_value(&self, name: &str, value: Value) {
        let event = {
            let mut inner = self.write();
            let Some(field) = inner.field_mut(name) else {
                trace!("set_field_value: unknown field '{name}', ignoring");
                return;
            };
            field.value = value.clone();
            field.error = None;
            inner.touched.insert(name.to_string());

            FormEvent::ValuesChange {
                values: inner.values_snapshot(),
                changed_values: BTreeMap::from([(name.to_string(), value)]),
            }
        };
        self.publish(event);
    }

    /// Set several field values.
    ///
    /// Each entry is applied as a separate [`Form::set_field_value`] call
    /// and emits its own notification; there is no batched event. Listeners
    /// observe one `ValuesChange` per entry.
    pub fn set_fields_value(&self, values: impl IntoIterator<Item = (String, Value)>) {
        for (name, value) in values {
            self.set_field_value(&name, value);
        }
    }

    /// Read one field's current value.
    pub fn get_field_value(&self, name: &str) -> Option<Value> {
        self.read().field(name).map(|f| f.value.clone())
    }

    /// Read field values as a flat name → value map.
    ///
    /// With `None`, every registered field is included. With a name list,
    /// only the named fields that exist are included.
    pub fn get_fields_value(&self, names: Option<&[&str]>) -> BTreeMap<String, Value> {
        let inner = self.read();
        match names {
            None => inner.values_snapshot(),
            Some(names) => names
                .iter()
                .filter_map(|name| inner.field(name))
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        }
    }

    /// Read one field's current validation error.
    pub fn get_field_error(&self, name: &str) -> Option<String> {
        self.read().field(name).and_then(|f| f.error.clone())
    }

    /// Whether the field has received an explicit value change since
    /// registration or last reset.
    pub fn is_field_touched(&self, name: &str) -> bool {
        self.read().touched.contains(name)
    }

    /// Registered field names in registration order.
    pub fn field_names(&self) -> Vec<String> {
        self.read().fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Whether a field with this name is registered.
    pub fn contains_field(&self, name: &str) -> bool {
        self.read().field(name).is_some()
    }
}
