use chrono::{DateTime, Utc};
use proanalysis_models::submission::ReferenceNumber;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ReferenceService: Send + Sync + 'static {
    /// Generates a human readable reference number for a submission made at
    /// `now`.
    ///
    /// Reference numbers are meant for correspondence only and are not
    /// guaranteed to be unique.
    fn generate(&self, now: DateTime<Utc>) -> ReferenceNumber;
}

#[cfg(feature = "mock")]
impl MockReferenceService {
    pub fn with_generate(mut self, now: DateTime<Utc>, result: ReferenceNumber) -> Self {
        self.expect_generate()
            .once()
            .with(mockall::predicate::eq(now))
            .return_once(|_| result);
        self
    }
}
