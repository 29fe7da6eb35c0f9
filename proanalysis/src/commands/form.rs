use std::{io::Read, path::PathBuf};

use anyhow::Context;
use clap::Args;
use proanalysis_models::contact::ContactForm;

/// Contact form given either as individual flags or as a JSON document.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Read the form from a JSON file (use `-` for stdin)
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["name", "email", "subject", "message", "company", "phone"]
    )]
    json: Option<PathBuf>,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

impl FormArgs {
    pub fn into_form(self) -> anyhow::Result<ContactForm> {
        let Some(path) = self.json else {
            return Ok(ContactForm {
                name: self.name,
                email: self.email,
                subject: self.subject,
                message: self.message,
                company: self.company,
                phone: self.phone,
            });
        };

        let content = if path.as_os_str() == "-" {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read form from stdin")?;
            content
        } else {
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read form from {}", path.display()))?
        };

        serde_json::from_str(&content).context("Failed to parse contact form")
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use proanalysis_demo::contact::JOHN_FORM;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        form: FormArgs,
    }

    #[test]
    fn from_flags() {
        // Act
        let result = Cli::try_parse_from([
            "test",
            "--name",
            "  John Smith ",
            "--email",
            "John.Smith@Example.COM",
            "--subject",
            "Process Reengineering Consultation",
            "--message",
            "We would like to review our intake process.\nCan we meet next week?",
            "--company",
            "Smith & Sons",
            "--phone",
            "+27 71 181 8582",
        ])
        .unwrap()
        .form
        .into_form()
        .unwrap();

        // Assert
        assert_eq!(result, *JOHN_FORM);
    }

    #[test]
    fn missing_flags_are_empty() {
        let result = Cli::try_parse_from(["test", "--name", "Jo"])
            .unwrap()
            .form
            .into_form()
            .unwrap();

        assert_eq!(
            result,
            ContactForm {
                name: "Jo".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn from_json_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, serde_json::to_string(&*JOHN_FORM).unwrap()).unwrap();

        // Act
        let result = Cli::try_parse_from(["test", "--json", path.to_str().unwrap()])
            .unwrap()
            .form
            .into_form()
            .unwrap();

        // Assert
        assert_eq!(result, *JOHN_FORM);
    }

    #[test]
    fn json_conflicts_with_flags() {
        let result = Cli::try_parse_from(["test", "--json", "form.json", "--name", "Jo"]);

        assert!(result.is_err());
    }
}
