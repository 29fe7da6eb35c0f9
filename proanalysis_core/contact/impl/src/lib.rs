use std::sync::Arc;

use chrono::{DateTime, Utc};
use proanalysis_core_contact_contracts::{
    rate_limit::ContactRateLimitService,
    submission_log::ContactSubmissionLogService,
    ContactService,
};
use proanalysis_email_contracts::{
    EmailTemplateParams, EmailTransport, EmailTransportError, EmailTransportErrorKind,
};
use proanalysis_models::{
    contact::{ContactField, ContactForm, ContactInfo, FieldValidation, FormValidation},
    submission::{ReferenceNumber, SubmissionLogEntry, SubmissionResult, SubmissionStats},
};
use proanalysis_shared_contracts::{reference::ReferenceService, time::TimeService};
use tracing::{error, info, warn};

pub mod rate_limit;
pub mod sanitize;
pub mod submission_log;
pub mod validation;

#[cfg(test)]
mod tests;

pub const SUBJECT_SUGGESTIONS: &[&str] = &[
    "Evidence Analysis Inquiry",
    "Process Reengineering Consultation",
    "Translation Services Request",
    "Expert Testimony Required",
    "General Business Inquiry",
    "Partnership Opportunity",
];

pub const RATE_LIMIT_MESSAGE: &str =
    "Too many emails sent recently. Please wait before sending another message.";

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Default))]
pub struct ContactServiceImpl<Time, Reference, RateLimit, SubmissionLog, Transport> {
    pub time: Time,
    pub reference: Reference,
    pub rate_limit: RateLimit,
    pub submission_log: SubmissionLog,
    pub transport: Transport,
    pub config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Default))]
pub struct ContactServiceConfig {
    /// Destination address of all contact form messages.
    pub to_email: Arc<str>,
    /// Address suggested to the visitor if sending fails.
    pub fallback_email: Arc<str>,
    pub info: Arc<ContactInfo>,
}

impl<Time, Reference, RateLimit, SubmissionLog, Transport> ContactService
    for ContactServiceImpl<Time, Reference, RateLimit, SubmissionLog, Transport>
where
    Time: TimeService,
    Reference: ReferenceService,
    RateLimit: ContactRateLimitService,
    SubmissionLog: ContactSubmissionLogService,
    Transport: EmailTransport,
{
    #[tracing::instrument(skip(self, form))]
    async fn submit(&self, form: ContactForm) -> SubmissionResult {
        let form = sanitize::normalize(form);
        if let Err(validation) = validation::validate(&form) {
            info!(fields = ?validation.errors.keys(), "Rejecting invalid contact form");
            return SubmissionResult::failure(
                format!(
                    "Please correct the following errors: {}",
                    validation.error_messages().join(", ")
                ),
                "Validation failed",
            );
        }
        let form = sanitize::sanitize(form);

        let now = self.time.now();
        let result = self.deliver(&form, now).await;

        let reference_number = match &result {
            Ok(reference_number) | Err(SubmitError::Transport(reference_number, _)) => {
                reference_number.clone()
            }
            Err(SubmitError::RateLimited) => self.reference.generate(now),
        };
        let entry = log_entry(&form, now, reference_number, result.is_ok());
        if let Err(err) = self.submission_log.record(entry).await {
            warn!("Failed to log contact form submission: {err:#}");
        }

        match result {
            Ok(reference_number) => SubmissionResult::success(format!(
                "Message sent successfully! Reference: {reference_number}. We'll respond within \
                 24 hours."
            )),
            Err(SubmitError::RateLimited) => {
                SubmissionResult::failure(RATE_LIMIT_MESSAGE, "Rate limit exceeded")
            }
            Err(SubmitError::Transport(_, err)) => {
                SubmissionResult::failure(self.failure_message(&err), err.to_string())
            }
        }
    }

    fn validate_form(&self, form: &ContactForm) -> FormValidation {
        validation::validate_form(form)
    }

    fn validate_field(&self, field: ContactField, value: &str) -> FieldValidation {
        validation::validate_field(field, value)
    }

    #[tracing::instrument(skip(self))]
    async fn submission_stats(&self) -> SubmissionStats {
        self.submission_log.stats().await.unwrap_or_else(|err| {
            warn!("Failed to load submission stats: {err:#}");
            SubmissionStats::default()
        })
    }

    fn contact_info(&self) -> ContactInfo {
        (*self.config.info).clone()
    }

    fn subject_suggestions(&self) -> &'static [&'static str] {
        SUBJECT_SUGGESTIONS
    }
}

enum SubmitError {
    RateLimited,
    Transport(ReferenceNumber, EmailTransportError),
}

impl<Time, Reference, RateLimit, SubmissionLog, Transport>
    ContactServiceImpl<Time, Reference, RateLimit, SubmissionLog, Transport>
where
    Reference: ReferenceService,
    RateLimit: ContactRateLimitService,
    Transport: EmailTransport,
{
    /// Sends an already sanitized form unless the rate limit forbids it.
    async fn deliver(
        &self,
        form: &ContactForm,
        now: DateTime<Utc>,
    ) -> Result<ReferenceNumber, SubmitError> {
        let decision = self.rate_limit.check(now).await;
        if !decision.is_allowed() {
            info!(?decision, "Rejecting contact form because of rate limit");
            return Err(SubmitError::RateLimited);
        }

        let reference_number = self.reference.generate(now);
        let params = template_params(form, &self.config.to_email, &reference_number);
        if let Err(err) = self.send(params).await {
            error!(%reference_number, "Failed to send contact form message: {err}");
            return Err(SubmitError::Transport(reference_number, err));
        }

        if let Err(err) = self.rate_limit.record(now).await {
            warn!("Failed to record submission for rate limiting: {err:#}");
        }

        info!(%reference_number, "Contact form message sent");
        Ok(reference_number)
    }

    async fn send(&self, params: EmailTemplateParams) -> Result<(), EmailTransportError> {
        let response = self.transport.send(params).await?;
        if !response.is_success() {
            return Err(EmailTransportError::Status {
                status: response.status,
                body: response.text,
            });
        }
        Ok(())
    }

    fn failure_message(&self, err: &EmailTransportError) -> String {
        let hint = match err.kind() {
            EmailTransportErrorKind::Configuration => {
                "Service configuration error. Please contact support.".into()
            }
            EmailTransportErrorKind::Connectivity => {
                "Please check your internet connection and try again.".into()
            }
            EmailTransportErrorKind::Provider => format!(
                "Please try again or contact {} directly.",
                self.config.fallback_email
            ),
        };
        format!("Failed to send message. {hint}")
    }
}

/// Builds the template variables from a sanitized form. Absent optional
/// fields are sent as empty strings.
fn template_params(
    form: &ContactForm,
    to_email: &str,
    reference_number: &ReferenceNumber,
) -> EmailTemplateParams {
    EmailTemplateParams {
        to_email: to_email.into(),
        from_name: form.name.clone(),
        from_email: form.email.clone(),
        subject: form.subject.clone(),
        message: form.message.clone(),
        company: form.company.clone().unwrap_or_default(),
        phone: form.phone.clone().unwrap_or_default(),
        reference_number: reference_number.to_string(),
    }
}

fn log_entry(
    form: &ContactForm,
    now: DateTime<Utc>,
    reference_number: ReferenceNumber,
    success: bool,
) -> SubmissionLogEntry {
    SubmissionLogEntry {
        timestamp: now,
        reference_number,
        subject: form.subject.clone(),
        has_company: form.company.is_some(),
        has_phone: form.phone.is_some(),
        message_length: form.message.chars().count(),
        success,
    }
}
