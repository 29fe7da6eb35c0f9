use std::{sync::Arc, time::Duration};

use proanalysis_config::Config;
use proanalysis_core_contact_impl::{
    rate_limit::{ContactRateLimitConfig, ContactRateLimitServiceImpl},
    submission_log::ContactSubmissionLogServiceImpl,
    ContactServiceConfig, ContactServiceImpl,
};
use proanalysis_email_impl::EmailJsTransportConfig;
use types::{Contact, EmailTransport, Storage};

pub mod types;

/// Service configuration derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    pub contact_service_config: ContactServiceConfig,
    pub contact_rate_limit_config: ContactRateLimitConfig,
    pub emailjs_transport_config: EmailJsTransportConfig,
    /// Sender name used for messages that do not originate from a visitor.
    pub from_name: Arc<str>,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let contact_service_config = ContactServiceConfig {
            to_email: config.contact.to_email.as_str().into(),
            fallback_email: config.contact.fallback_email.as_str().into(),
            info: config.contact.info.clone().into(),
        };

        let contact_rate_limit_config = ContactRateLimitConfig {
            max_per_hour: config.rate_limit.max_emails_per_hour,
            cooldown: Duration::from_secs(config.rate_limit.cooldown_minutes.saturating_mul(60)),
        };

        let emailjs_transport_config = EmailJsTransportConfig {
            service_id: config.emailjs.service_id.clone(),
            template_id: config.emailjs.template_id.clone(),
            public_key: config.emailjs.public_key.clone(),
            private_key: config.emailjs.private_key.clone(),
            endpoint: config
                .emailjs
                .endpoint_override
                .clone()
                .unwrap_or_else(EmailJsTransportConfig::default_endpoint),
            timeout: config.emailjs.timeout.map(Into::into),
        };

        Self {
            contact_service_config,
            contact_rate_limit_config,
            emailjs_transport_config,
            from_name: config.contact.from_name.as_str().into(),
        }
    }
}

/// Wires the services used by the CLI commands.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    storage: Storage,
}

impl Provider {
    pub fn new(config: ConfigProvider, storage: Storage) -> Self {
        Self { config, storage }
    }

    pub fn config(&self) -> &ConfigProvider {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn email_transport(&self) -> anyhow::Result<EmailTransport> {
        EmailTransport::new(self.config.emailjs_transport_config.clone())
    }

    pub fn contact(&self) -> anyhow::Result<Contact> {
        Ok(ContactServiceImpl {
            time: Default::default(),
            reference: Default::default(),
            rate_limit: ContactRateLimitServiceImpl::new(
                self.storage.clone(),
                self.config.contact_rate_limit_config,
            ),
            submission_log: ContactSubmissionLogServiceImpl::new(self.storage.clone()),
            transport: self.email_transport()?,
            config: self.config.contact_service_config.clone(),
        })
    }
}
