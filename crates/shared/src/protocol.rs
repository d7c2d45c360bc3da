use serde::{Deserialize, Serialize};

use crate::domain::ContactFields;

pub const DEFAULT_SERVICE_NAME: &str = "YogaSeekho";

/// Template variables the email template is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub service_name: String,
    pub from_name: String,
    pub from_email: String,
    pub phone: String,
    pub message: String,
}

impl TemplateParams {
    pub fn from_fields(service_name: impl Into<String>, fields: &ContactFields) -> Self {
        Self {
            service_name: service_name.into(),
            from_name: fields.name.clone(),
            from_email: fields.email.clone(),
            phone: fields.phone.clone(),
            message: fields.message.clone(),
        }
    }
}

/// Body of `POST /api/v1.0/email/send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSendRequest {
    pub service_id: String,
    pub template_id: String,
    /// The account's public key; the REST API names it `user_id`.
    pub user_id: String,
    pub template_params: TemplateParams,
}
