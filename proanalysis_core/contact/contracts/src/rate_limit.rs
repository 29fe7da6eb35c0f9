use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRateLimitService: Send + Sync + 'static {
    /// Decides whether a submission at `now` is allowed.
    ///
    /// Checking does not reserve anything: two checks that happen before
    /// either submission is recorded may both be allowed.
    fn check(&self, now: DateTime<Utc>) -> impl Future<Output = RateLimitDecision> + Send;

    /// Records an accepted submission at `now`.
    fn record(&self, now: DateTime<Utc>) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// The maximum number of submissions within the last hour has been
    /// reached.
    HourlyLimitReached,
    /// The previous submission was too recent.
    CooldownActive { remaining: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }
}

#[cfg(feature = "mock")]
impl MockContactRateLimitService {
    pub fn with_check(mut self, now: DateTime<Utc>, result: RateLimitDecision) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(now))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_record(mut self, now: DateTime<Utc>, ok: bool) -> Self {
        self.expect_record()
            .once()
            .with(mockall::predicate::eq(now))
            .return_once(move |_| {
                Box::pin(std::future::ready(if ok {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("quota exceeded"))
                }))
            });
        self
    }
}
