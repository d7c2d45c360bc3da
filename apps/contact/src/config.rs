use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use contact_core::{emailjs, EmailJsConfig};
use serde::Deserialize;
use shared::protocol::DEFAULT_SERVICE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub emailjs_service_id: Option<String>,
    pub emailjs_template_id: Option<String>,
    pub emailjs_public_key: Option<String>,
    pub emailjs_api_url: String,
    pub service_name: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            emailjs_service_id: None,
            emailjs_template_id: None,
            emailjs_public_key: None,
            emailjs_api_url: emailjs::DEFAULT_API_URL.into(),
            service_name: DEFAULT_SERVICE_NAME.into(),
            request_timeout_secs: emailjs::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    pub fn emailjs_config(&self) -> EmailJsConfig {
        EmailJsConfig {
            service_id: self.emailjs_service_id.clone(),
            template_id: self.emailjs_template_id.clone(),
            public_key: self.emailjs_public_key.clone(),
            service_name: self.service_name.clone(),
        }
    }

    /// Zero maps to the default timeout.
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => emailjs::DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    emailjs_service_id: Option<String>,
    emailjs_template_id: Option<String>,
    emailjs_public_key: Option<String>,
    emailjs_api_url: Option<String>,
    service_name: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    if let Some(raw) = read_optional(path)? {
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err)
            .with_context(|| format!("failed to read settings file '{}'", path.display())),
    }
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.emailjs_service_id {
        settings.emailjs_service_id = Some(v);
    }
    if let Some(v) = file_cfg.emailjs_template_id {
        settings.emailjs_template_id = Some(v);
    }
    if let Some(v) = file_cfg.emailjs_public_key {
        settings.emailjs_public_key = Some(v);
    }
    if let Some(v) = file_cfg.emailjs_api_url {
        settings.emailjs_api_url = v;
    }
    if let Some(v) = file_cfg.service_name {
        settings.service_name = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        anyhow::ensure!(v > 0, "request_timeout_secs must be greater than zero");
        settings.request_timeout_secs = v;
    }
    Ok(())
}

/// Later names win: `VITE_*` (the web build's names), plain, then `APP__*`.
fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    let lookup = |suffix: &str| {
        [
            format!("VITE_{suffix}"),
            suffix.to_string(),
            format!("APP__{suffix}"),
        ]
        .iter()
        .filter_map(|key| var(key))
        .last()
    };

    if let Some(v) = lookup("EMAILJS_SERVICE_ID") {
        settings.emailjs_service_id = Some(v);
    }
    if let Some(v) = lookup("EMAILJS_TEMPLATE_ID") {
        settings.emailjs_template_id = Some(v);
    }
    if let Some(v) = lookup("EMAILJS_PUBLIC_KEY") {
        settings.emailjs_public_key = Some(v);
    }
    if let Some(v) = lookup("EMAILJS_API_URL") {
        settings.emailjs_api_url = v;
    }
    if let Some(v) = lookup("SERVICE_NAME") {
        settings.service_name = v;
    }
    if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed @ 1..) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
