use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Configuration,
    Dispatch,
    Internal,
}

/// Serializable diagnostic form of a [`ContactError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("invalid contact form: {0}")]
    Validation(FieldErrors),
    #[error("email dispatch configuration is missing: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },
    #[error("email dispatch failed: {message}")]
    Dispatch { message: String },
    #[error("email dispatch configuration is already installed")]
    AlreadyConfigured,
}

impl ContactError {
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ContactError::Validation(_) => ErrorCode::Validation,
            ContactError::Configuration { .. } => ErrorCode::Configuration,
            ContactError::Dispatch { .. } => ErrorCode::Dispatch,
            ContactError::AlreadyConfigured => ErrorCode::Internal,
        }
    }

    /// Short tag used as the `error_kind` field in log events.
    pub fn kind(&self) -> &'static str {
        match self.code() {
            ErrorCode::Validation => "validation",
            ErrorCode::Configuration => "configuration",
            ErrorCode::Dispatch => "dispatch",
            ErrorCode::Internal => "internal",
        }
    }
}

impl From<&ContactError> for ApiError {
    fn from(value: &ContactError) -> Self {
        let fields = match value {
            ContactError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };
        Self {
            code: value.code(),
            message: value.to_string(),
            fields,
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(value: ContactError) -> Self {
        Self::from(&value)
    }
}
