//! The submission coordinator: submit and reset.

use log::{debug, info};
use serde_json::Value;

use super::Form;
use crate::event::FormEvent;
use crate::outcome::{SubmitOutcome, ValidationOutcome};

impl Form {
    /// Validate the full field set and emit a terminal outcome.
    ///
    /// On success, emits one [`FormEvent::Submit`] carrying every field's
    /// value; on failure, one [`FormEvent::SubmitFailed`] carrying the
    /// error map. The two are mutually exclusive and neither is an `Err`:
    /// a failed submit leaves the form interactive with its (invalid)
    /// values in place for correction. A submit superseded by a newer
    /// validation emits nothing.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.validate_fields(None).await {
            Ok(ValidationOutcome::Valid) => {
                let values = self.get_fields_value(None);
                info!("submit: accepted with {} value(s)", values.len());
                self.publish(FormEvent::Submit {
                    values: values.clone(),
                });
                SubmitOutcome::Submitted { values }
            }
            Ok(ValidationOutcome::Invalid(errors)) => {
                let errors: std::collections::BTreeMap<_, _> = errors
                    .into_iter()
                    .map(|e| (e.field, e.message))
                    .collect();
                info!("submit: rejected, {} field(s) failed", errors.len());
                self.publish(FormEvent::SubmitFailed {
                    errors: errors.clone(),
                });
                SubmitOutcome::Rejected { errors }
            }
            Ok(ValidationOutcome::Superseded) => {
                debug!("submit: superseded by a newer validation");
                SubmitOutcome::Superseded
            }
            // validate_fields(None) only targets registered fields; an
            // unknown-field error here means the registry changed while a
            // custom validator was pending, so this run no longer speaks
            // for the form.
            Err(_) => {
                debug!("submit: field set changed mid-validation");
                SubmitOutcome::Superseded
            }
        }
    }

    /// Reset fields to their initial values.
    ///
    /// With `None`, every registered field is reset. Each targeted field
    /// gets its initial value (or null when it has none), its error
    /// cleared, and its touched mark removed. Unknown names are skipped.
    /// Validation is not re-run.
    pub fn reset_fields(&self, names: Option<&[&str]>) {
        let mut inner = self.write();
        let targets: Vec<String> = match names {
            None => inner.fields.iter().map(|f| f.name.clone()).collect(),
            Some(names) => names.iter().map(|n| n.to_string()).collect(),
        };

        debug!("reset_fields: {} field(s)", targets.len());
        for name in targets {
            let initial = inner
                .initial_values
                .get(&name)
                .cloned()
                .unwrap_or(Value::Null);
            let Some(field) = inner.field_mut(&name) else {
                continue;
            };
            field.value = initial;
            field.error = None;
            inner.touched.remove(&name);
        }
    }
}
