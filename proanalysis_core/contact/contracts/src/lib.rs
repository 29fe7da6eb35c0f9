use std::future::Future;

use proanalysis_models::{
    contact::{ContactField, ContactForm, ContactInfo, FieldValidation, FormValidation},
    submission::{SubmissionResult, SubmissionStats},
};

pub mod rate_limit;
pub mod submission_log;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Sanitizes, validates and sends a contact form message.
    ///
    /// Every failure (invalid input, rate limit, transport or configuration
    /// errors) is reported through the returned [`SubmissionResult`].
    fn submit(&self, form: ContactForm) -> impl Future<Output = SubmissionResult> + Send;

    /// Validates all fields of the form without submitting it.
    fn validate_form(&self, form: &ContactForm) -> FormValidation;

    /// Validates a single field, e.g. for live feedback while typing.
    fn validate_field(&self, field: ContactField, value: &str) -> FieldValidation;

    /// Returns analytics about recent submissions.
    fn submission_stats(&self) -> impl Future<Output = SubmissionStats> + Send;

    /// Returns the public contact details of the practice.
    fn contact_info(&self) -> ContactInfo;

    /// Returns subject lines for common inquiries.
    fn subject_suggestions(&self) -> &'static [&'static str];
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(mut self, form: ContactForm, result: SubmissionResult) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
