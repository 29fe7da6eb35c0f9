use std::sync::LazyLock;

use proanalysis_models::contact::{ContactForm, ContactInfo, ValidatedContactForm};

pub const TO_EMAIL: &str = "contact@example.com";
pub const FALLBACK_EMAIL: &str = "fallback@example.com";

/// Minimal valid form without optional fields.
pub static JO_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "Jo".into(),
    email: "jo@example.com".into(),
    subject: "Evidence Inquiry".into(),
    message: "Please contact me about case analysis.".into(),
    company: None,
    phone: None,
});

pub static JO: LazyLock<ValidatedContactForm> = LazyLock::new(|| ValidatedContactForm {
    name: "Jo".try_into().unwrap(),
    email: "jo@example.com".try_into().unwrap(),
    subject: "Evidence Inquiry".try_into().unwrap(),
    message: "Please contact me about case analysis.".try_into().unwrap(),
    company: None,
    phone: None,
});

/// Valid form with all optional fields, as typed by a visitor.
pub static JOHN_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "  John Smith ".into(),
    email: "John.Smith@Example.COM".into(),
    subject: "Process Reengineering Consultation".into(),
    message: "We would like to review our intake process.\nCan we meet next week?".into(),
    company: Some("Smith & Sons".into()),
    phone: Some("+27 71 181 8582".into()),
});

pub static JOHN: LazyLock<ValidatedContactForm> = LazyLock::new(|| ValidatedContactForm {
    name: "John Smith".try_into().unwrap(),
    email: "john.smith@example.com".try_into().unwrap(),
    subject: "Process Reengineering Consultation".try_into().unwrap(),
    message: "We would like to review our intake process.\nCan we meet next week?"
        .try_into()
        .unwrap(),
    company: Some("Smith & Sons".try_into().unwrap()),
    phone: Some("+27711818582".try_into().unwrap()),
});

pub static CONTACT_INFO: LazyLock<ContactInfo> = LazyLock::new(|| ContactInfo {
    email: "contact@example.com".into(),
    phone: "+27 71 181 8582".into(),
    linkedin: "https://www.linkedin.com/in/example".into(),
    business_hours: "Monday - Friday, 8:00 - 17:00 (SAST)".into(),
    response_time: "Within 24 hours".into(),
});
