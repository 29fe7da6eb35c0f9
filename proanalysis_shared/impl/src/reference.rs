use chrono::{DateTime, Utc};
use proanalysis_models::submission::ReferenceNumber;
use proanalysis_shared_contracts::reference::ReferenceService;
use rand::{thread_rng, Rng};

/// Upper bound (exclusive) of the random suffix.
const SUFFIX_RANGE: u32 = 1000;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceServiceImpl;

impl ReferenceService for ReferenceServiceImpl {
    #[tracing::instrument(skip(self))]
    fn generate(&self, now: DateTime<Utc>) -> ReferenceNumber {
        generate_reference_number(thread_rng(), now)
    }
}

fn generate_reference_number(mut rng: impl Rng, now: DateTime<Utc>) -> ReferenceNumber {
    let suffix = rng.gen_range(0..SUFFIX_RANGE);
    ReferenceNumber::try_new(format!(
        "{}-{}-{suffix}",
        ReferenceNumber::PREFIX,
        now.timestamp_millis().max(0)
    ))
    .expect("reference number format matches REFERENCE_NUMBER_REGEX")
}
