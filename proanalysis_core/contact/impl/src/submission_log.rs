use std::collections::HashMap;

use anyhow::Context;
use proanalysis_core_contact_contracts::submission_log::ContactSubmissionLogService;
use proanalysis_models::submission::{SubjectCount, SubmissionLogEntry, SubmissionStats};
use proanalysis_storage_contracts::StorageService;
use tracing::warn;

pub const SUBMISSION_LOG_STORAGE_KEY: &str = "contact_submissions";

/// Number of log entries kept in storage.
pub const MAX_LOGGED_SUBMISSIONS: usize = 10;

/// Number of subjects reported in [`SubmissionStats::common_subjects`].
pub const COMMON_SUBJECTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct ContactSubmissionLogServiceImpl<Storage> {
    storage: Storage,
}

impl<Storage> ContactSubmissionLogServiceImpl<Storage> {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl<Storage> ContactSubmissionLogService for ContactSubmissionLogServiceImpl<Storage>
where
    Storage: StorageService,
{
    #[tracing::instrument(skip(self, entry), fields(reference_number = %entry.reference_number))]
    async fn record(&self, entry: SubmissionLogEntry) -> anyhow::Result<()> {
        let mut entries = self.entries().await.unwrap_or_else(|err| {
            warn!("Discarding unreadable submission log: {err:#}");
            Vec::new()
        });

        entries.push(entry);
        let excess = entries.len().saturating_sub(MAX_LOGGED_SUBMISSIONS);
        entries.drain(..excess);

        self.storage
            .set(SUBMISSION_LOG_STORAGE_KEY, &entries)
            .await
            .context("Failed to save submission log")
    }

    #[tracing::instrument(skip(self))]
    async fn stats(&self) -> anyhow::Result<SubmissionStats> {
        self.entries().await.map(|entries| stats(&entries))
    }
}

impl<Storage> ContactSubmissionLogServiceImpl<Storage>
where
    Storage: StorageService,
{
    async fn entries(&self) -> anyhow::Result<Vec<SubmissionLogEntry>> {
        self.storage
            .get(SUBMISSION_LOG_STORAGE_KEY)
            .await
            .map(Option::unwrap_or_default)
            .context("Failed to load submission log")
    }
}

fn stats(entries: &[SubmissionLogEntry]) -> SubmissionStats {
    let mut counts = HashMap::<&str, usize>::new();
    for entry in entries {
        *counts.entry(&entry.subject).or_default() += 1;
    }

    let mut common_subjects = counts
        .into_iter()
        .map(|(subject, count)| SubjectCount {
            subject: subject.into(),
            count,
        })
        .collect::<Vec<_>>();
    common_subjects.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.subject.cmp(&b.subject)));
    common_subjects.truncate(COMMON_SUBJECTS_LIMIT);

    SubmissionStats {
        total_submissions: entries.len(),
        last_submission: entries.iter().map(|entry| entry.timestamp).max(),
        common_subjects,
    }
}
