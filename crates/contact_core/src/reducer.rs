//! Contact form state transitions. No I/O happens here; the controller
//! carries out whatever [`Effect`] a transition asks for.

use shared::domain::{ContactField, ContactFields, FormState, FormStatus, Notice};

use crate::validation::validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    FieldChanged { field: ContactField, value: String },
    SubmitRequested,
    DispatchSucceeded,
    DispatchFailed,
    ComposeAnother,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The action is not valid in the current status; state is untouched.
    Ignored,
    /// Submission refused; `errors` now lists the offending fields.
    Invalid,
    /// Relay this snapshot to the email service.
    Dispatch(ContactFields),
    Notify(Notice),
}

pub fn reduce(state: &mut FormState, action: FormAction) -> Effect {
    match action {
        FormAction::FieldChanged { field, value } => {
            if !state.status.is_editable() {
                return Effect::Ignored;
            }
            state.fields.set(field, value);
            state.errors = validate(&state.fields);
            Effect::None
        }
        FormAction::SubmitRequested => {
            if !state.status.accepts_submit() {
                return Effect::Ignored;
            }
            state.errors = validate(&state.fields);
            if !state.errors.is_empty() {
                return Effect::Invalid;
            }
            state.status = FormStatus::Submitting;
            Effect::Dispatch(state.fields.clone())
        }
        FormAction::DispatchSucceeded => {
            if state.status != FormStatus::Submitting {
                return Effect::Ignored;
            }
            state.fields = ContactFields::default();
            state.errors.clear();
            state.status = FormStatus::Submitted;
            Effect::Notify(Notice::sent())
        }
        FormAction::DispatchFailed => {
            if state.status != FormStatus::Submitting {
                return Effect::Ignored;
            }
            state.status = FormStatus::Failed;
            Effect::Notify(Notice::send_failed())
        }
        FormAction::ComposeAnother => {
            if state.status != FormStatus::Submitted {
                return Effect::Ignored;
            }
            *state = FormState::default();
            Effect::None
        }
    }
}
