//! Contact form controller: validation, submission lifecycle, and relay of
//! the message to the email service.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use shared::{
    domain::{ContactField, ContactFields, FieldErrors, FormState, FormStatus, Notice, SubmissionId},
    error::{ApiError, ContactError},
    protocol::TemplateParams,
};
use tracing::{debug, error, info, warn};

pub mod config;
pub mod emailjs;
pub mod reducer;
pub mod validation;

pub use config::{Credentials, EmailJsConfig};
pub use emailjs::EmailJsClient;
pub use reducer::{reduce, Effect, FormAction};

/// Relays one contact message to the email service.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn send(
        &self,
        credentials: &Credentials,
        params: &TemplateParams,
    ) -> Result<(), ContactError>;
}

/// Write-only surface for user-facing notices.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not in a state that accepts a submission; nothing happened.
    Ignored,
    Invalid(FieldErrors),
    Submitted,
    /// The message was not sent; `code` tells configuration and dispatch failures apart.
    Failed(ApiError),
}

pub struct ContactFormController {
    state: Mutex<FormState>,
    config: EmailJsConfig,
    dispatcher: Arc<dyn EmailDispatcher>,
    notifier: Arc<dyn NotificationSink>,
}

impl ContactFormController {
    pub fn new(
        config: EmailJsConfig,
        dispatcher: Arc<dyn EmailDispatcher>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            config,
            dispatcher,
            notifier,
        }
    }

    pub fn state(&self) -> FormState {
        self.lock().clone()
    }

    pub fn status(&self) -> FormStatus {
        self.lock().status
    }

    pub fn fields(&self) -> ContactFields {
        self.lock().fields.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    /// Returns `false` when the form is not editable.
    pub fn set_field(&self, field: ContactField, value: impl Into<String>) -> bool {
        let effect = reduce(
            &mut self.lock(),
            FormAction::FieldChanged {
                field,
                value: value.into(),
            },
        );
        effect != Effect::Ignored
    }

    pub fn set_fields(&self, fields: ContactFields) -> bool {
        let mut state = self.lock();
        ContactField::ALL.into_iter().all(|field| {
            let value = fields.get(field).to_string();
            reduce(&mut state, FormAction::FieldChanged { field, value }) != Effect::Ignored
        })
    }

    /// Returns to an empty, idle form after a successful send. No effect otherwise.
    pub fn reset_for_another_message(&self) -> bool {
        reduce(&mut self.lock(), FormAction::ComposeAnother) != Effect::Ignored
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let fields = {
            let mut state = self.lock();
            match reduce(&mut state, FormAction::SubmitRequested) {
                Effect::Dispatch(fields) => fields,
                Effect::Invalid => {
                    debug!(errors = %state.errors, "contact form rejected by validation");
                    return SubmitOutcome::Invalid(state.errors.clone());
                }
                _ => {
                    debug!(status = ?state.status, "submit ignored");
                    return SubmitOutcome::Ignored;
                }
            }
        };

        let submission_id = SubmissionId::new();
        let in_flight = InFlight {
            controller: self,
            submission_id,
            armed: true,
        };

        let (action, outcome) = match self.dispatch(&fields).await {
            Ok(()) => {
                info!(%submission_id, "contact message sent");
                (FormAction::DispatchSucceeded, SubmitOutcome::Submitted)
            }
            Err(err) => {
                match &err {
                    ContactError::Configuration { missing } => error!(
                        %submission_id,
                        error_kind = err.kind(),
                        missing = ?missing,
                        "email dispatch is not configured"
                    ),
                    _ => error!(
                        %submission_id,
                        error_kind = err.kind(),
                        error = %err,
                        "email dispatch failed"
                    ),
                }
                (FormAction::DispatchFailed, SubmitOutcome::Failed(ApiError::from(&err)))
            }
        };

        if let Effect::Notify(notice) = in_flight.complete(action) {
            self.notifier.notify(&notice);
        }
        outcome
    }

    async fn dispatch(&self, fields: &ContactFields) -> Result<(), ContactError> {
        let credentials = self.config.credentials()?;
        let params = TemplateParams::from_fields(self.config.service_name.as_str(), fields);
        self.dispatcher.send(&credentials, &params).await
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leaves `Submitting` even if the submit future is dropped mid-dispatch.
struct InFlight<'a> {
    controller: &'a ContactFormController,
    submission_id: SubmissionId,
    armed: bool,
}

impl InFlight<'_> {
    fn complete(mut self, action: FormAction) -> Effect {
        self.armed = false;
        reduce(&mut self.controller.lock(), action)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            reduce(&mut self.controller.lock(), FormAction::DispatchFailed);
            warn!(submission_id = %self.submission_id, "submission abandoned before completion");
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
