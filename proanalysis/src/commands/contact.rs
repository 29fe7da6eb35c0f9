use anyhow::bail;
use proanalysis_core_contact_contracts::ContactService;
use proanalysis_models::contact::{ContactField, ContactForm, ContactInfo};
use serde_json::json;

pub async fn submit(contact: &impl ContactService, form: ContactForm) -> anyhow::Result<()> {
    let result = contact.submit(form).await;
    println!("{}", result.message);
    if let Some(error) = result.error.filter(|_| !result.success) {
        bail!(error);
    }
    Ok(())
}

pub fn validate(contact: &impl ContactService, form: &ContactForm) -> anyhow::Result<()> {
    let validation = contact.validate_form(form);
    if validation.is_valid() {
        println!("Form is valid");
        return Ok(());
    }

    for message in validation.error_messages() {
        println!("{message}");
    }
    bail!("Validation failed");
}

pub fn validate_field(
    contact: &impl ContactService,
    field: ContactField,
    value: &str,
) -> anyhow::Result<()> {
    match contact.validate_field(field, value).error {
        None => {
            println!("{} is valid", field.label());
            Ok(())
        }
        Some(error) => bail!(error),
    }
}

pub async fn stats(contact: &impl ContactService) -> anyhow::Result<()> {
    let stats = contact.submission_stats().await;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub fn info(contact: &impl ContactService) -> anyhow::Result<()> {
    println!("{}", info_json(contact.contact_info(), contact.subject_suggestions()));
    Ok(())
}

fn info_json(info: ContactInfo, subject_suggestions: &[&str]) -> String {
    let value = json!({
        "contact": info,
        "subject_suggestions": subject_suggestions,
    });
    format!("{value:#}")
}
