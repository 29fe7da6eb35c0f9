use proanalysis_models::contact::ContactForm;

/// Replaces the characters `<`, `>`, `"`, `'` and `/` with HTML entities.
///
/// `&` is left untouched, so escaping an already escaped string does not
/// change it.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            c => out.push(c),
        }
    }
    out
}

/// Trims all fields, lowercases the email address, strips whitespace from the
/// phone number and drops blank optional fields.
pub fn normalize(form: ContactForm) -> ContactForm {
    ContactForm {
        name: form.name.trim().into(),
        email: form.email.trim().to_lowercase(),
        subject: form.subject.trim().into(),
        message: form.message.trim().into(),
        company: form
            .company
            .map(|company| company.trim().to_owned())
            .filter(|company| !company.is_empty()),
        phone: form
            .phone
            .map(|phone| phone.split_whitespace().collect::<String>())
            .filter(|phone| !phone.is_empty()),
    }
}

/// Normalizes the form and escapes all free text fields. Email address and
/// phone number are not escaped.
pub fn sanitize(form: ContactForm) -> ContactForm {
    let form = normalize(form);
    ContactForm {
        name: escape_html(&form.name),
        email: form.email,
        subject: escape_html(&form.subject),
        message: escape_html(&form.message),
        company: form.company.as_deref().map(escape_html),
        phone: form.phone,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proanalysis_demo::contact::JOHN_FORM;

    use super::*;

    #[test]
    fn escape() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(escape_html("O'Brien & Co"), "O&#x27;Brien & Co");
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn escape_is_idempotent() {
        for input in [r#"<a href="/x">'hi'</a>"#, "a & b", "&lt;", "1/2"] {
            let once = escape_html(input);
            assert_eq!(escape_html(&once), once);
        }
    }

    #[test]
    fn normalize_form() {
        // Act
        let result = normalize(JOHN_FORM.clone());

        // Assert
        assert_eq!(
            result,
            ContactForm {
                name: "John Smith".into(),
                email: "john.smith@example.com".into(),
                subject: "Process Reengineering Consultation".into(),
                message: "We would like to review our intake process.\nCan we meet next week?"
                    .into(),
                company: Some("Smith & Sons".into()),
                phone: Some("+27711818582".into()),
            }
        );
    }

    #[test]
    fn normalize_drops_blank_optional_fields() {
        let result = normalize(ContactForm {
            company: Some(" \t ".into()),
            phone: Some("  ".into()),
            ..Default::default()
        });

        assert_eq!(result.company, None);
        assert_eq!(result.phone, None);
    }

    #[test]
    fn sanitize_escapes_text_fields_only() {
        // Arrange
        let form = ContactForm {
            name: " <b>Jo</b> ".into(),
            email: " Jo/Doe@Example.com ".into(),
            subject: "Re: \"urgent\"".into(),
            message: "<script>alert(1)</script>".into(),
            company: Some("A/B Ltd".into()),
            phone: Some("+27 71 181 8582".into()),
        };

        // Act
        let result = sanitize(form);

        // Assert
        assert_eq!(
            result,
            ContactForm {
                name: "&lt;b&gt;Jo&lt;&#x2F;b&gt;".into(),
                email: "jo/doe@example.com".into(),
                subject: "Re: &quot;urgent&quot;".into(),
                message: "&lt;script&gt;alert(1)&lt;&#x2F;script&gt;".into(),
                company: Some("A&#x2F;B Ltd".into()),
                phone: Some("+27711818582".into()),
            }
        );
    }

    #[test]
    fn sanitize_is_idempotent() {
        let form = ContactForm {
            name: "  <i>Jo</i>  ".into(),
            email: " JO@EXAMPLE.COM".into(),
            subject: "'quoted' subject".into(),
            message: " a/b <c> \"d\" ".into(),
            company: Some(" ".into()),
            phone: Some("071 181 8582".into()),
        };

        let once = sanitize(form);
        assert_eq!(sanitize(once.clone()), once);
    }
}
