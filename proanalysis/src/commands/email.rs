use anyhow::ensure;
use clap::Subcommand;
use proanalysis_email_contracts::{EmailTemplateParams, EmailTransport};
use proanalysis_shared_contracts::{reference::ReferenceService, time::TimeService};
use proanalysis_shared_impl::{reference::ReferenceServiceImpl, time::TimeServiceImpl};

use crate::environment::Provider;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test {
        /// Recipient address, defaults to the configured destination address
        recipient: Option<String>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, provider: Provider) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(provider, recipient).await,
        }
    }
}

async fn test(provider: Provider, recipient: Option<String>) -> anyhow::Result<()> {
    let transport = provider.email_transport()?;
    let config = provider.config();

    let reference_number = ReferenceServiceImpl.generate(TimeServiceImpl.now());
    let params = EmailTemplateParams {
        to_email: recipient.unwrap_or_else(|| config.contact_service_config.to_email.to_string()),
        from_name: config.from_name.to_string(),
        from_email: config.contact_service_config.fallback_email.to_string(),
        subject: "Email Deliverability Test".into(),
        message: "Email deliverability seems to be working!".into(),
        company: String::new(),
        phone: String::new(),
        reference_number: reference_number.to_string(),
    };

    let response = transport.send(params).await?;
    ensure!(
        response.is_success(),
        "Failed to send email: {} {}",
        response.status,
        response.text
    );

    println!("Test email sent (reference {reference_number})");
    Ok(())
}
