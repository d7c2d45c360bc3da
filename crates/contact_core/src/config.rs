//! Process-wide EmailJS configuration.
//!
//! Installed once during startup and kept for the life of the process.

use std::sync::OnceLock;

use shared::{error::ContactError, protocol::DEFAULT_SERVICE_NAME};

static INSTALLED: OnceLock<EmailJsConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub service_name: String,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            service_id: None,
            template_id: None,
            public_key: None,
            service_name: DEFAULT_SERVICE_NAME.into(),
        }
    }
}

/// The three values every dispatch call needs, all known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailJsConfig {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: Some(service_id.into()),
            template_id: Some(template_id.into()),
            public_key: Some(public_key.into()),
            ..Self::default()
        }
    }

    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Names of the required values that are absent or blank.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("service_id", &self.service_id),
            ("template_id", &self.template_id),
            ("public_key", &self.public_key),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(key, _)| key)
        .collect()
    }

    pub fn credentials(&self) -> Result<Credentials, ContactError> {
        match (
            present(&self.service_id),
            present(&self.template_id),
            present(&self.public_key),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Ok(Credentials {
                service_id: service_id.to_string(),
                template_id: template_id.to_string(),
                public_key: public_key.to_string(),
            }),
            _ => Err(ContactError::Configuration {
                missing: self.missing(),
            }),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Stores `config` for the rest of the process. A second call fails.
pub fn install(config: EmailJsConfig) -> Result<(), ContactError> {
    INSTALLED
        .set(config)
        .map_err(|_| ContactError::AlreadyConfigured)
}

pub fn installed() -> Option<&'static EmailJsConfig> {
    INSTALLED.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_config_yields_trimmed_credentials() {
        let config = EmailJsConfig::new(" svc ", "tpl", "pk");
        let credentials = config.credentials().expect("credentials");
        assert_eq!(credentials.service_id, "svc");
        assert_eq!(credentials.template_id, "tpl");
        assert_eq!(credentials.public_key, "pk");
    }

    #[test]
    fn blank_and_absent_values_are_missing() {
        let config = EmailJsConfig {
            service_id: Some("svc".into()),
            template_id: Some("   ".into()),
            public_key: None,
            ..EmailJsConfig::default()
        };

        let err = config.credentials().expect_err("must be missing");
        match err {
            ContactError::Configuration { missing } => {
                assert_eq!(missing, vec!["template_id", "public_key"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_service_name_is_the_studio() {
        assert_eq!(EmailJsConfig::default().service_name, "YogaSeekho");
    }

    #[test]
    fn install_happens_once_per_process() {
        assert!(installed().is_none());
        install(EmailJsConfig::new("svc", "tpl", "pk")).expect("first install");
        assert_eq!(
            installed().and_then(|c| c.service_id.as_deref()),
            Some("svc")
        );

        let err = install(EmailJsConfig::default()).expect_err("second install");
        assert!(matches!(err, ContactError::AlreadyConfigured));
        assert_eq!(installed().and_then(|c| c.public_key.as_deref()), Some("pk"));
    }
}
