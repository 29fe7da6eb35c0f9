use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{macros::nutype_string, REFERENCE_NUMBER_REGEX};

nutype_string!(ReferenceNumber(validate(regex = REFERENCE_NUMBER_REGEX)));

impl ReferenceNumber {
    pub const PREFIX: &'static str = "PBA";
}

/// Outcome of a single contact form submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Analytics record of a submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub reference_number: ReferenceNumber,
    pub subject: String,
    pub has_company: bool,
    pub has_phone: bool,
    pub message_length: usize,
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total_submissions: usize,
    pub last_submission: Option<DateTime<Utc>>,
    pub common_subjects: Vec<SubjectCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCount {
    pub subject: String,
    pub count: usize,
}
