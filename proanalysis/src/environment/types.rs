use proanalysis_core_contact_impl::{
    rate_limit::ContactRateLimitServiceImpl, submission_log::ContactSubmissionLogServiceImpl,
    ContactServiceImpl,
};
use proanalysis_email_impl::EmailJsTransport;
use proanalysis_shared_impl::{reference::ReferenceServiceImpl, time::TimeServiceImpl};

pub use crate::storage::Storage;

// Shared
pub type Time = TimeServiceImpl;
pub type Reference = ReferenceServiceImpl;

// Email
pub type EmailTransport = EmailJsTransport;

// Core
pub type ContactRateLimit = ContactRateLimitServiceImpl<Storage>;
pub type ContactSubmissionLog = ContactSubmissionLogServiceImpl<Storage>;
pub type Contact =
    ContactServiceImpl<Time, Reference, ContactRateLimit, ContactSubmissionLog, EmailTransport>;
