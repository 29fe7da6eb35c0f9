use std::{sync::Arc, time::Duration};

use anyhow::Context;
use proanalysis_email_contracts::{
    EmailSendResponse, EmailTemplateParams, EmailTransport, EmailTransportError,
};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/";
const SEND_ROUTE: &str = "api/v1.0/email/send";

/// Sends templated emails through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsTransport {
    config: Arc<EmailJsTransportConfig>,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsTransportConfig {
    pub service_id: String,
    pub template_id: String,
    /// Public key of the EmailJS account. Sending fails with
    /// [`EmailTransportError::NotConfigured`] while this is missing.
    pub public_key: Option<String>,
    /// Private key, required if the account enforces API access tokens.
    pub private_key: Option<String>,
    /// Base URL of the EmailJS API.
    pub endpoint: Url,
    pub timeout: Option<Duration>,
}

impl EmailJsTransportConfig {
    pub fn default_endpoint() -> Url {
        EMAILJS_ENDPOINT
            .parse()
            .expect("EMAILJS_ENDPOINT is a valid url")
    }
}

impl EmailJsTransport {
    pub fn new(config: EmailJsTransportConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self {
            config: config.into(),
            client,
        })
    }
}

impl EmailTransport for EmailJsTransport {
    #[tracing::instrument(skip_all, fields(reference_number = %params.reference_number))]
    async fn send(
        &self,
        params: EmailTemplateParams,
    ) -> Result<EmailSendResponse, EmailTransportError> {
        let Some(public_key) = self
            .config
            .public_key
            .as_deref()
            .filter(|key| !key.is_empty())
        else {
            return Err(EmailTransportError::NotConfigured);
        };

        let url = self
            .config
            .endpoint
            .join(SEND_ROUTE)
            .context("Failed to build EmailJS send url")?;

        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: public_key,
            access_token: self.config.private_key.as_deref(),
            template_params: &params,
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify_error)?;

        if (200..300).contains(&status) {
            debug!(status, "email accepted by EmailJS");
        } else {
            warn!(status, body = %text, "email rejected by EmailJS");
        }

        Ok(EmailSendResponse { status, text })
    }
}

fn classify_error(err: reqwest::Error) -> EmailTransportError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        EmailTransportError::Network(err.into())
    } else {
        EmailTransportError::Other(err.into())
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a EmailTemplateParams,
}
