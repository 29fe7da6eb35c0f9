use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use proanalysis_core_contact_contracts::rate_limit::{
    ContactRateLimitService, RateLimitDecision,
};
use proanalysis_storage_contracts::StorageService;
use tracing::warn;

pub const RATE_LIMIT_STORAGE_KEY: &str = "email_submissions";

/// Number of submission timestamps kept in storage.
pub const MAX_TRACKED_SUBMISSIONS: usize = 20;

const WINDOW_MILLIS: i64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Default)]
pub struct ContactRateLimitServiceImpl<Storage> {
    storage: Storage,
    config: ContactRateLimitConfig,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactRateLimitConfig {
    /// Maximum number of submissions within one hour.
    pub max_per_hour: usize,
    /// Minimum time between two submissions.
    pub cooldown: Duration,
}

impl<Storage> ContactRateLimitServiceImpl<Storage> {
    pub fn new(storage: Storage, config: ContactRateLimitConfig) -> Self {
        Self { storage, config }
    }
}

impl<Storage> ContactRateLimitService for ContactRateLimitServiceImpl<Storage>
where
    Storage: StorageService,
{
    #[tracing::instrument(skip(self))]
    async fn check(&self, now: DateTime<Utc>) -> RateLimitDecision {
        match self.submissions().await {
            Ok(submissions) => decide(&submissions, now.timestamp_millis(), self.config),
            Err(err) => {
                warn!("Rate limit check failed, allowing submission: {err:#}");
                RateLimitDecision::Allowed
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn record(&self, now: DateTime<Utc>) -> anyhow::Result<()> {
        let mut submissions = self.submissions().await.unwrap_or_else(|err| {
            warn!("Discarding unreadable submission timestamps: {err:#}");
            Vec::new()
        });

        submissions.push(now.timestamp_millis());
        let excess = submissions.len().saturating_sub(MAX_TRACKED_SUBMISSIONS);
        submissions.drain(..excess);

        self.storage
            .set(RATE_LIMIT_STORAGE_KEY, &submissions)
            .await
            .context("Failed to save submission timestamps")
    }
}

impl<Storage> ContactRateLimitServiceImpl<Storage>
where
    Storage: StorageService,
{
    async fn submissions(&self) -> anyhow::Result<Vec<i64>> {
        self.storage
            .get(RATE_LIMIT_STORAGE_KEY)
            .await
            .map(Option::unwrap_or_default)
            .context("Failed to load submission timestamps")
    }
}

fn decide(submissions: &[i64], now: i64, config: ContactRateLimitConfig) -> RateLimitDecision {
    let window_start = now - WINDOW_MILLIS;
    let recent = submissions.iter().filter(|&&t| t > window_start).count();
    if recent >= config.max_per_hour {
        return RateLimitDecision::HourlyLimitReached;
    }

    let cooldown = i64::try_from(config.cooldown.as_millis()).unwrap_or(i64::MAX);
    if let Some(&last) = submissions.iter().max() {
        let elapsed = now.saturating_sub(last);
        if elapsed < cooldown {
            let remaining = u64::try_from(cooldown - elapsed).unwrap_or(u64::MAX);
            return RateLimitDecision::CooldownActive {
                remaining: Duration::from_millis(remaining),
            };
        }
    }

    RateLimitDecision::Allowed
}
