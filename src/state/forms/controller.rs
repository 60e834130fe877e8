//! Form controller: field binding, validation-gated submission and its status

use super::form_state::Form;
use crate::auth::{SubmissionError, SubmissionTask};
use crate::state::{Navigator, View};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Lifecycle of a form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    /// `Failed` is as eligible for resubmission as `Idle`
    pub fn can_submit(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }
}

/// Why `submit` did not produce a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError<K: std::fmt::Debug> {
    #[error("{} field(s) failed validation", .fields.len())]
    Invalid { fields: Vec<K> },
    #[error("a submission is already in progress")]
    AlreadyPending,
    #[error("submission failed: {0}")]
    Failed(SubmissionError),
}

/// A validated snapshot handed to the submission task
#[derive(Debug, Clone)]
pub struct Submission<V> {
    pub attempt: Uuid,
    pub values: V,
}

/// Owns one screen's form and drives its submission
#[derive(Debug, Clone)]
pub struct FormController<F: Form> {
    form: F,
    status: SubmissionStatus,
    pending_attempt: Option<Uuid>,
    last_error: Option<String>,
    on_success: Option<View>,
}

impl<F: Form + Default> Default for FormController<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: Form> FormController<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            status: SubmissionStatus::Idle,
            pending_attempt: None,
            last_error: None,
            on_success: None,
        }
    }

    /// Navigate to `view` once a submission succeeds
    pub fn navigate_on_success(mut self, view: View) -> Self {
        self.on_success = Some(view);
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Update a field value; validation only runs on submit
    pub fn set_field_value(&mut self, field: F::Field, value: impl Into<String>) {
        self.form.field_mut(field).set_value(value);
    }

    /// Fields currently carrying an error, in form order
    pub fn errors(&self) -> Vec<(F::Field, &str)> {
        F::FIELDS
            .iter()
            .filter_map(|&f| self.form.field(f).error().map(|e| (f, e)))
            .collect()
    }

    /// Validate and, if every field passes, move to `Pending` and snapshot the values
    pub fn begin_submit(&mut self) -> Result<Submission<F::Values>, SubmitError<F::Field>> {
        if !self.status.can_submit() {
            debug!("Ignoring submit while a submission is pending");
            return Err(SubmitError::AlreadyPending);
        }

        let failing = self.form.validate();
        if !failing.is_empty() {
            debug!(?failing, "Form validation failed");
            return Err(SubmitError::Invalid { fields: failing });
        }

        let attempt = Uuid::new_v4();
        self.status = SubmissionStatus::Pending;
        self.pending_attempt = Some(attempt);
        self.last_error = None;
        Ok(Submission {
            attempt,
            values: self.form.values(),
        })
    }

    /// Apply the outcome of `attempt`; outcomes of stale attempts are ignored
    pub fn complete(
        &mut self,
        attempt: Uuid,
        outcome: Result<(), SubmissionError>,
        navigator: &mut dyn Navigator,
    ) -> bool {
        if self.pending_attempt != Some(attempt) {
            debug!(%attempt, "Dropping outcome of a stale submission");
            return false;
        }
        self.pending_attempt = None;

        match outcome {
            Ok(()) => {
                info!(%attempt, "Submission succeeded");
                self.status = SubmissionStatus::Succeeded;
                if let Some(view) = self.on_success {
                    navigator.navigate(view);
                }
            }
            Err(err) => {
                error!(%attempt, error = %err, "Submission failed");
                self.status = SubmissionStatus::Failed;
                self.last_error = Some(err.to_string());
            }
        }
        true
    }

    /// Validate, run `task` to completion and apply its outcome
    pub async fn submit<T>(
        &mut self,
        task: &T,
        navigator: &mut dyn Navigator,
    ) -> Result<(), SubmitError<F::Field>>
    where
        T: SubmissionTask<F::Values> + ?Sized,
    {
        let Submission { attempt, values } = self.begin_submit()?;
        let outcome = task.run(values).await;
        self.complete(attempt, outcome.clone(), navigator);
        outcome.map_err(SubmitError::Failed)
    }

    /// Discard the form state, as when the owning screen goes away
    pub fn reset(&mut self)
    where
        F: Default,
    {
        self.form = F::default();
        self.status = SubmissionStatus::Idle;
        self.pending_attempt = None;
        self.last_error = None;
    }
}
