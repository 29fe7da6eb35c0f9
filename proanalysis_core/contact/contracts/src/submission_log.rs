use std::future::Future;

use proanalysis_models::submission::{SubmissionLogEntry, SubmissionStats};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactSubmissionLogService: Send + Sync + 'static {
    /// Appends an entry to the log, discarding the oldest entries beyond the
    /// retention limit.
    fn record(&self, entry: SubmissionLogEntry)
        -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Summarizes the retained log entries.
    fn stats(&self) -> impl Future<Output = anyhow::Result<SubmissionStats>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactSubmissionLogService {
    pub fn with_record(mut self, entry: SubmissionLogEntry) -> Self {
        self.expect_record()
            .once()
            .with(mockall::predicate::eq(entry))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_stats(mut self, result: SubmissionStats) -> Self {
        self.expect_stats()
            .once()
            .return_once(|| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
