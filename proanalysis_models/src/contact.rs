use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{macros::nutype_string, EMAIL_REGEX};

/// Contact form as entered by the visitor, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Contact form whose fields have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContactForm {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessageBody,
    pub company: Option<ContactCompany>,
    pub phone: Option<ContactPhone>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
    Company,
    Phone,
}

impl ContactField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Subject,
        Self::Message,
        Self::Company,
        Self::Phone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Company => "company",
            Self::Phone => "phone",
        }
    }

    /// Capitalized field name used as prefix in error listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
            Self::Company => "Company",
            Self::Phone => "Phone",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact form field: {0:?}")]
pub struct UnknownContactFieldError(pub String);

impl FromStr for ContactField {
    type Err = UnknownContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownContactFieldError(s.into()))
    }
}

nutype_string!(ContactName(
    sanitize(trim),
    validate(len_char_min = 2, len_char_max = 100)
));

nutype_string!(ContactEmail(
    sanitize(trim, lowercase),
    validate(not_empty, regex = EMAIL_REGEX)
));

nutype_string!(ContactSubject(
    sanitize(trim),
    validate(len_char_min = 5, len_char_max = 200)
));

nutype_string!(ContactMessageBody(
    sanitize(trim),
    validate(len_char_min = 10, len_char_max = 2000)
));

nutype_string!(ContactCompany(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 200)
));

nutype_string!(ContactPhone(
    sanitize(with = |phone: String| phone.split_whitespace().collect::<String>()),
    validate(predicate = |phone: &str| {
        (ContactPhone::MIN_DIGITS..=ContactPhone::MAX_DIGITS).contains(&phone_digit_count(phone))
    })
));

impl ContactPhone {
    pub const MIN_DIGITS: usize = 8;
    pub const MAX_DIGITS: usize = 15;
}

/// Number of ASCII digits in a phone number, ignoring any formatting
/// characters like `+`, `-` or parentheses.
pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

/// Result of validating a whole [`ContactForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: BTreeMap<ContactField, String>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages in field order, prefixed with the field label, e.g.
    /// `"Name: Name must be between 2 and 100 characters"`.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|(field, message)| format!("{}: {message}", field.label()))
            .collect()
    }
}

/// Result of validating a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidation {
    pub error: Option<String>,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self { error: None }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Public contact details of the practice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub business_hours: String,
    pub response_time: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_from_str() {
        for field in ContactField::ALL {
            assert_eq!(field.as_str().parse::<ContactField>().unwrap(), field);
            assert_eq!(field.label().parse::<ContactField>().unwrap(), field);
        }
        assert_eq!(
            "fax".parse::<ContactField>(),
            Err(UnknownContactFieldError("fax".into()))
        );
    }

    #[test]
    fn error_messages_are_in_field_order() {
        // Arrange
        let validation = FormValidation {
            errors: [
                (ContactField::Phone, "Please enter a valid phone number".into()),
                (ContactField::Name, "Name must be between 2 and 100 characters".into()),
            ]
            .into(),
        };

        // Act
        let result = validation.error_messages();

        // Assert
        assert!(!validation.is_valid());
        assert_eq!(
            result,
            [
                "Name: Name must be between 2 and 100 characters",
                "Phone: Please enter a valid phone number",
            ]
        );
    }

    #[test]
    fn name_bounds() {
        assert!(ContactName::try_new("A").is_err());
        assert!(ContactName::try_new("  Jo  ").is_ok());
        assert_eq!(*ContactName::try_new("  Jo  ").unwrap(), "Jo");
        assert!(ContactName::try_new("x".repeat(100)).is_ok());
        assert!(ContactName::try_new("x".repeat(101)).is_err());
    }

    #[test]
    fn name_counts_chars_not_bytes() {
        assert!(ContactName::try_new("Zoë").is_ok());
        assert!(ContactName::try_new("ë".repeat(100)).is_ok());
        assert!(ContactName::try_new("ë".repeat(101)).is_err());
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = ContactEmail::try_new("  Jo@Example.COM ").unwrap();
        assert_eq!(email.as_ref(), "jo@example.com");
        assert!(ContactEmail::try_new("   ").is_err());
        assert!(ContactEmail::try_new("not-an-email").is_err());
    }

    #[test]
    fn phone_digits() {
        let phone = ContactPhone::try_new("+27 71 181 8582").unwrap();
        assert_eq!(phone.as_ref(), "+27711818582");

        assert!(ContactPhone::try_new("(012) 345-67").is_ok());
        assert!(ContactPhone::try_new("1234567").is_err());
        assert!(ContactPhone::try_new("1234567890123456").is_err());
        assert!(ContactPhone::try_new("phone").is_err());
    }

    #[test]
    fn form_deserialize_without_optional_fields() {
        let form = serde_json::from_str::<ContactForm>(
            r#"{"name":"Jo","email":"jo@example.com","subject":"Hello","message":"Hello there!"}"#,
        )
        .unwrap();
        assert_eq!(form.company, None);
        assert_eq!(form.phone, None);
    }
}
