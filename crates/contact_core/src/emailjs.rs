use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ContactError,
    protocol::{EmailSendRequest, TemplateParams},
};
use tracing::debug;
use url::Url;

use crate::{config::Credentials, EmailDispatcher};

pub const DEFAULT_API_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const SEND_PATH: &str = "api/v1.0/email/send";

/// [`EmailDispatcher`] backed by the EmailJS REST API.
pub struct EmailJsClient {
    http: Client,
    endpoint: Url,
}

impl EmailJsClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        anyhow::ensure!(!timeout.is_zero(), "EmailJS request timeout must be non-zero");
        let endpoint = send_endpoint(api_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build EmailJS http client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn send_endpoint(api_url: &str) -> Result<Url> {
    let mut base =
        Url::parse(api_url.trim()).with_context(|| format!("invalid EmailJS api url '{api_url}'"))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SEND_PATH)
        .with_context(|| format!("failed to build send endpoint from '{api_url}'"))
}

#[async_trait]
impl EmailDispatcher for EmailJsClient {
    async fn send(
        &self,
        credentials: &Credentials,
        params: &TemplateParams,
    ) -> Result<(), ContactError> {
        let body = EmailSendRequest {
            service_id: credentials.service_id.clone(),
            template_id: credentials.template_id.clone(),
            user_id: credentials.public_key.clone(),
            template_params: params.clone(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| ContactError::dispatch(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ContactError::dispatch(format!(
                "email service responded {status}: {}",
                detail.trim()
            )));
        }

        debug!(%status, endpoint = %self.endpoint, "email service accepted message");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/emailjs_tests.rs"]
mod tests;
