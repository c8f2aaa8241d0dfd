//! The validation orchestrator: per-field rule evaluation and full-form
//! aggregation.

use log::{debug, trace};

use super::Form;
use crate::error::FormError;
use crate::outcome::{FieldError, ValidationOutcome};
use crate::rule::evaluate;

/// Result of validating one field within a given generation.
struct Verdict {
    /// Rendered failure message, or None when the field passed.
    failure: Option<String>,
    /// True when a newer validation started while this one awaited; the
    /// result was not written back.
    stale: bool,
}

impl Form {
    /// Validate one field against its rule list.
    ///
    /// The resulting error (or its absence) is written back onto the field.
    /// Returns whether the field passed. Failures are data, never `Err`;
    /// `Err` means the field is not registered.
    pub async fn validate_field(&self, name: &str) -> Result<bool, FormError> {
        let generation = self.begin_validation();
        let verdict = self.validate_one(name, generation).await?;
        Ok(verdict.failure.is_none())
    }

    /// Validate fields sequentially, in registration order.
    ///
    /// With `None`, every registered field is validated. Fields are awaited
    /// one at a time, never concurrently, so state written for field *i* is
    /// visible before field *i+1* starts. This keeps side-effect ordering
    /// deterministic at the cost of total latency when many async custom
    /// validators are present.
    ///
    /// If a newer validation starts while this one is suspended, the run
    /// stops writing state and reports [`ValidationOutcome::Superseded`].
    pub async fn validate_fields(
        &self,
        names: Option<&[&str]>,
    ) -> Result<ValidationOutcome, FormError> {
        let generation = self.begin_validation();
        let targets = self.target_fields(names)?;
        trace!("validate_fields: {} field(s), generation {generation}", targets.len());

        let mut errors = Vec::new();
        for name in targets {
            let verdict = self.validate_one(&name, generation).await?;
            if verdict.stale {
                debug!("validate_fields: generation {generation} superseded at '{name}'");
                return Ok(ValidationOutcome::Superseded);
            }
            if let Some(message) = verdict.failure {
                errors.push(FieldError::new(name, message));
            }
        }

        Ok(if errors.is_empty() {
            ValidationOutcome::Valid
        } else {
            debug!("validate_fields: {} field(s) failed", errors.len());
            ValidationOutcome::Invalid(errors)
        })
    }

    /// Resolve the target names for a validation pass, in registration
    /// order. Requesting an unregistered name is an error.
    fn target_fields(&self, names: Option<&[&str]>) -> Result<Vec<String>, FormError> {
        let inner = self.read();
        match names {
            None => Ok(inner.fields.iter().map(|f| f.name.clone()).collect()),
            Some(names) => {
                for name in names {
                    if inner.field(name).is_none() {
                        return Err(FormError::unknown_field(*name));
                    }
                }
                Ok(inner
                    .fields
                    .iter()
                    .filter(|f| names.contains(&f.name.as_str()))
                    .map(|f| f.name.clone())
                    .collect())
            }
        }
    }

    /// Evaluate one field's rules and write the outcome back, unless the
    /// generation went stale while awaiting.
    async fn validate_one(&self, name: &str, generation: u64) -> Result<Verdict, FormError> {
        // Clone what evaluation needs so no lock is held across an await.
        let (value, rules, timeout) = {
            let inner = self.read();
            let field = inner
                .field(name)
                .ok_or_else(|| FormError::unknown_field(name))?;
            (field.value.clone(), field.rules.clone(), inner.validate_timeout)
        };

        let failure = evaluate(&value, &rules, timeout)
            .await
            .map(|f| f.message(name));

        if self.current_generation() != generation {
            trace!("validate_one: '{name}' result discarded (stale generation {generation})");
            return Ok(Verdict {
                failure,
                stale: true,
            });
        }

        let mut inner = self.write();
        let Some(field) = inner.field_mut(name) else {
            // Unregistered while evaluating; nothing to write back.
            return Ok(Verdict {
                failure,
                stale: true,
            });
        };
        field.error = failure.clone();

        Ok(Verdict {
            failure,
            stale: false,
        })
    }
}
