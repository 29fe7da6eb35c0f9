use proanalysis_models::contact::{
    ContactCompany, ContactEmail, ContactField, ContactForm, ContactMessageBody, ContactName,
    ContactPhone, ContactSubject, FieldValidation, FormValidation, ValidatedContactForm,
};

pub const NAME_ERROR: &str = "Name must be between 2 and 100 characters";
pub const EMAIL_REQUIRED_ERROR: &str = "Email is required";
pub const EMAIL_INVALID_ERROR: &str = "Please enter a valid email address";
pub const SUBJECT_ERROR: &str = "Subject must be between 5 and 200 characters";
pub const MESSAGE_ERROR: &str = "Message must be between 10 and 2000 characters";
pub const COMPANY_ERROR: &str = "Company name must be less than 200 characters";
pub const PHONE_ERROR: &str = "Please enter a valid phone number";

type FieldResult<T> = Result<T, &'static str>;

/// Validates a single field. Empty optional fields are valid.
pub fn validate_field(field: ContactField, value: &str) -> FieldValidation {
    let error = match field {
        ContactField::Name => parse_name(value).err(),
        ContactField::Email => parse_email(value).err(),
        ContactField::Subject => parse_subject(value).err(),
        ContactField::Message => parse_message(value).err(),
        ContactField::Company => parse_optional(Some(value), parse_company).err(),
        ContactField::Phone => parse_optional(Some(value), parse_phone).err(),
    };
    error.map_or_else(FieldValidation::valid, FieldValidation::invalid)
}

pub fn validate_form(form: &ContactForm) -> FormValidation {
    validate(form).err().unwrap_or_default()
}

/// Converts the form into its validated representation, collecting the
/// errors of all invalid fields otherwise.
pub fn validate(form: &ContactForm) -> Result<ValidatedContactForm, FormValidation> {
    let name = parse_name(&form.name);
    let email = parse_email(&form.email);
    let subject = parse_subject(&form.subject);
    let message = parse_message(&form.message);
    let company = parse_optional(form.company.as_deref(), parse_company);
    let phone = parse_optional(form.phone.as_deref(), parse_phone);

    match (name, email, subject, message, company, phone) {
        (Ok(name), Ok(email), Ok(subject), Ok(message), Ok(company), Ok(phone)) => {
            Ok(ValidatedContactForm {
                name,
                email,
                subject,
                message,
                company,
                phone,
            })
        }
        (name, email, subject, message, company, phone) => {
            let errors = [
                (ContactField::Name, name.err()),
                (ContactField::Email, email.err()),
                (ContactField::Subject, subject.err()),
                (ContactField::Message, message.err()),
                (ContactField::Company, company.err()),
                (ContactField::Phone, phone.err()),
            ]
            .into_iter()
            .filter_map(|(field, error)| error.map(|error| (field, error.to_owned())))
            .collect();
            Err(FormValidation { errors })
        }
    }
}

fn parse_name(value: &str) -> FieldResult<ContactName> {
    ContactName::try_new(value).map_err(|_| NAME_ERROR)
}

fn parse_email(value: &str) -> FieldResult<ContactEmail> {
    if value.trim().is_empty() {
        return Err(EMAIL_REQUIRED_ERROR);
    }
    ContactEmail::try_new(value).map_err(|_| EMAIL_INVALID_ERROR)
}

fn parse_subject(value: &str) -> FieldResult<ContactSubject> {
    ContactSubject::try_new(value).map_err(|_| SUBJECT_ERROR)
}

fn parse_message(value: &str) -> FieldResult<ContactMessageBody> {
    ContactMessageBody::try_new(value).map_err(|_| MESSAGE_ERROR)
}

fn parse_company(value: &str) -> FieldResult<ContactCompany> {
    ContactCompany::try_new(value).map_err(|_| COMPANY_ERROR)
}

fn parse_phone(value: &str) -> FieldResult<ContactPhone> {
    ContactPhone::try_new(value).map_err(|_| PHONE_ERROR)
}

fn parse_optional<T>(
    value: Option<&str>,
    parse: impl FnOnce(&str) -> FieldResult<T>,
) -> FieldResult<Option<T>> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(parse)
        .transpose()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proanalysis_demo::contact::{JO, JOHN, JOHN_FORM, JO_FORM};

    use super::*;

    #[test]
    fn valid_forms() {
        assert_eq!(validate(&JO_FORM).unwrap(), *JO);
        assert_eq!(validate(&JOHN_FORM).unwrap(), *JOHN);
        assert!(validate_form(&JOHN_FORM).is_valid());
    }

    #[test]
    fn empty_form() {
        // Act
        let result = validate_form(&ContactForm::default());

        // Assert
        assert_eq!(
            result.error_messages(),
            [
                "Name: Name must be between 2 and 100 characters",
                "Email: Email is required",
                "Subject: Subject must be between 5 and 200 characters",
                "Message: Message must be between 10 and 2000 characters",
            ]
        );
    }

    #[test]
    fn all_invalid_fields_are_reported() {
        // Arrange
        let form = ContactForm {
            name: "A".into(),
            email: "not-an-email".into(),
            subject: "Hi".into(),
            message: "Short".into(),
            company: Some("x".repeat(201)),
            phone: Some("12 34".into()),
        };

        // Act
        let result = validate(&form).unwrap_err();

        // Assert
        assert_eq!(
            result.errors,
            [
                (ContactField::Name, NAME_ERROR.into()),
                (ContactField::Email, EMAIL_INVALID_ERROR.into()),
                (ContactField::Subject, SUBJECT_ERROR.into()),
                (ContactField::Message, MESSAGE_ERROR.into()),
                (ContactField::Company, COMPANY_ERROR.into()),
                (ContactField::Phone, PHONE_ERROR.into()),
            ]
            .into()
        );
    }

    #[test]
    fn length_limits_apply_to_trimmed_values() {
        let form = ContactForm {
            name: format!("  {}  ", "x".repeat(100)),
            subject: format!("{}\n", "s".repeat(200)),
            message: format!(" {} ", "m".repeat(2000)),
            ..JO_FORM.clone()
        };
        assert!(validate_form(&form).is_valid());

        let form = ContactForm {
            name: " J ".into(),
            ..JO_FORM.clone()
        };
        assert_eq!(
            validate_form(&form).errors,
            [(ContactField::Name, NAME_ERROR.into())].into()
        );
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        // Arrange
        let form = ContactForm {
            company: Some("   ".into()),
            phone: Some("".into()),
            ..JO_FORM.clone()
        };

        // Act
        let result = validate(&form).unwrap();

        // Assert
        assert_eq!(result, *JO);
    }

    #[test]
    fn single_field() {
        assert!(validate_field(ContactField::Name, "Jo").is_valid());
        assert_eq!(
            validate_field(ContactField::Name, "J"),
            FieldValidation::invalid(NAME_ERROR)
        );
        assert_eq!(
            validate_field(ContactField::Email, "  "),
            FieldValidation::invalid(EMAIL_REQUIRED_ERROR)
        );
        assert_eq!(
            validate_field(ContactField::Email, "jo@"),
            FieldValidation::invalid(EMAIL_INVALID_ERROR)
        );
        assert!(validate_field(ContactField::Email, "Jo@Example.com").is_valid());
        assert!(validate_field(ContactField::Company, "").is_valid());
        assert!(validate_field(ContactField::Phone, "").is_valid());
        assert!(validate_field(ContactField::Phone, "+27 (71) 181-8582").is_valid());
        assert_eq!(
            validate_field(ContactField::Phone, "call me"),
            FieldValidation::invalid(PHONE_ERROR)
        );
        assert_eq!(
            validate_field(ContactField::Company, &"c".repeat(201)),
            FieldValidation::invalid(COMPANY_ERROR)
        );
    }

    #[test]
    fn field_length_bounds() {
        let cases = [
            (ContactField::Name, 1, Some(NAME_ERROR)),
            (ContactField::Name, 2, None),
            (ContactField::Name, 100, None),
            (ContactField::Name, 101, Some(NAME_ERROR)),
            (ContactField::Subject, 4, Some(SUBJECT_ERROR)),
            (ContactField::Subject, 5, None),
            (ContactField::Subject, 200, None),
            (ContactField::Subject, 201, Some(SUBJECT_ERROR)),
            (ContactField::Message, 9, Some(MESSAGE_ERROR)),
            (ContactField::Message, 10, None),
            (ContactField::Message, 2000, None),
            (ContactField::Message, 2001, Some(MESSAGE_ERROR)),
            (ContactField::Company, 1, None),
            (ContactField::Company, 200, None),
            (ContactField::Company, 201, Some(COMPANY_ERROR)),
        ];

        for (field, len, error) in cases {
            let value = "é".repeat(len);
            assert_eq!(
                validate_field(field, &value),
                error.map_or_else(FieldValidation::valid, FieldValidation::invalid),
                "{field} with {len} characters"
            );
        }
    }

    #[test]
    fn phone_digit_bounds() {
        let cases = [
            ("1234567", false),
            ("12345678", true),
            ("123456789012345", true),
            ("1234567890123456", false),
            ("+1 234 567", false),
            ("+1 (234) 567-8901", true),
        ];

        for (phone, valid) in cases {
            assert_eq!(
                validate_field(ContactField::Phone, phone).is_valid(),
                valid,
                "{phone}"
            );
        }
    }
}
