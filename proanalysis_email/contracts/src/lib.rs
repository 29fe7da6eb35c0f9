use std::future::Future;

use serde::Serialize;
use thiserror::Error;

/// Hosted transactional email provider that renders a stored template with
/// the given parameters and delivers it.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailTransport: Send + Sync + 'static {
    /// Sends one templated email.
    ///
    /// Returns the provider's response for any answer the provider gave,
    /// including non-2xx answers. Callers must check
    /// [`EmailSendResponse::is_success`].
    fn send(
        &self,
        params: EmailTemplateParams,
    ) -> impl Future<Output = Result<EmailSendResponse, EmailTransportError>> + Send;
}

/// Variables available to the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTemplateParams {
    pub to_email: String,
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub company: String,
    pub phone: String,
    pub reference_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSendResponse {
    pub status: u16,
    pub text: String,
}

impl EmailSendResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            text: "OK".into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum EmailTransportError {
    #[error("Email provider public key not configured")]
    NotConfigured,
    #[error("Network error while contacting the email provider: {0}")]
    Network(#[source] anyhow::Error),
    #[error("Email provider responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTransportErrorKind {
    /// The transport is missing credentials. Only the operator can fix this.
    Configuration,
    /// The provider could not be reached.
    Connectivity,
    /// The provider was reached but did not accept the email.
    Provider,
}

impl EmailTransportError {
    pub fn kind(&self) -> EmailTransportErrorKind {
        match self {
            Self::NotConfigured => EmailTransportErrorKind::Configuration,
            Self::Network(_) => EmailTransportErrorKind::Connectivity,
            Self::Status { .. } | Self::Other(_) => EmailTransportErrorKind::Provider,
        }
    }
}

#[cfg(feature = "mock")]
impl MockEmailTransport {
    pub fn with_send(mut self, params: EmailTemplateParams, response: EmailSendResponse) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(params))
            .return_once(move |_| Box::pin(std::future::ready(Ok(response))));
        self
    }

    pub fn with_send_error(
        mut self,
        params: EmailTemplateParams,
        error: EmailTransportError,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(params))
            .return_once(move |_| Box::pin(std::future::ready(Err(error))));
        self
    }
}
