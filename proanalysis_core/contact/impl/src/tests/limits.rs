use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::{DateTime, TimeDelta, Utc};
use proanalysis_core_contact_contracts::ContactService;
use proanalysis_demo::{contact::JO_FORM, NOW};
use proanalysis_email_contracts::{EmailSendResponse, EmailTransportError, MockEmailTransport};
use proanalysis_models::submission::{ReferenceNumber, SubmissionResult};
use proanalysis_shared_contracts::{reference::ReferenceService, time::TimeService};
use proanalysis_storage_contracts::StorageService;
use proanalysis_storage_impl::MemoryStorage;

use crate::{
    rate_limit::{ContactRateLimitConfig, ContactRateLimitServiceImpl, RATE_LIMIT_STORAGE_KEY},
    submission_log::ContactSubmissionLogServiceImpl,
    tests::config,
    ContactServiceImpl, RATE_LIMIT_MESSAGE,
};

#[derive(Debug, Clone)]
struct TestClock(Arc<Mutex<DateTime<Utc>>>);

impl TestClock {
    fn new(now: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    fn advance(&self, delta: TimeDelta) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) += delta;
    }
}

impl TimeService for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone, Copy)]
struct CountingReference;

impl ReferenceService for CountingReference {
    fn generate(&self, now: DateTime<Utc>) -> ReferenceNumber {
        format!("PBA-{}-1", now.timestamp_millis())
            .try_into()
            .unwrap()
    }
}

type Sut = ContactServiceImpl<
    TestClock,
    CountingReference,
    ContactRateLimitServiceImpl<MemoryStorage>,
    ContactSubmissionLogServiceImpl<MemoryStorage>,
    MockEmailTransport,
>;

fn make_sut(clock: &TestClock, storage: &MemoryStorage, transport: MockEmailTransport) -> Sut {
    ContactServiceImpl {
        time: clock.clone(),
        reference: CountingReference,
        rate_limit: ContactRateLimitServiceImpl::new(
            storage.clone(),
            ContactRateLimitConfig {
                max_per_hour: 10,
                cooldown: Duration::from_secs(5 * 60),
            },
        ),
        submission_log: ContactSubmissionLogServiceImpl::new(storage.clone()),
        transport,
        config: config(),
    }
}

fn accepting_transport(times: usize) -> MockEmailTransport {
    let mut transport = MockEmailTransport::new();
    transport.expect_send().times(times).returning(|_| {
        Box::pin(async {
            tokio::task::yield_now().await;
            Ok::<_, EmailTransportError>(EmailSendResponse::ok())
        })
    });
    transport
}

fn rate_limited() -> SubmissionResult {
    SubmissionResult::failure(RATE_LIMIT_MESSAGE, "Rate limit exceeded")
}

#[tokio::test]
async fn hourly_limit() {
    // Arrange
    let clock = TestClock::new(*NOW);
    let storage = MemoryStorage::new();
    let sut = make_sut(&clock, &storage, accepting_transport(11));

    // Act + Assert
    for _ in 0..10 {
        assert!(sut.submit(JO_FORM.clone()).await.success);
        clock.advance(TimeDelta::minutes(5));
    }

    // 10 submissions within the last 50 minutes
    assert_eq!(sut.submit(JO_FORM.clone()).await, rate_limited());

    // the first submission leaves the window after one hour
    clock.advance(TimeDelta::minutes(10));
    assert!(sut.submit(JO_FORM.clone()).await.success);

    let stats = sut.submission_stats().await;
    assert_eq!(stats.total_submissions, 10);
    assert_eq!(stats.last_submission, Some(clock.now()));
}

#[tokio::test]
async fn cooldown() {
    // Arrange
    let clock = TestClock::new(*NOW);
    let storage = MemoryStorage::new();
    let sut = make_sut(&clock, &storage, accepting_transport(2));

    // Act + Assert
    assert!(sut.submit(JO_FORM.clone()).await.success);

    clock.advance(TimeDelta::minutes(4));
    assert_eq!(sut.submit(JO_FORM.clone()).await, rate_limited());

    clock.advance(TimeDelta::minutes(1));
    assert!(sut.submit(JO_FORM.clone()).await.success);

    let timestamps = storage
        .get::<Vec<i64>>(RATE_LIMIT_STORAGE_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        timestamps,
        [
            NOW.timestamp_millis(),
            (*NOW + TimeDelta::minutes(5)).timestamp_millis()
        ]
    );
}

#[tokio::test]
async fn failed_sends_do_not_count() {
    // Arrange
    let clock = TestClock::new(*NOW);
    let storage = MemoryStorage::new();
    let mut transport = MockEmailTransport::new();
    transport.expect_send().times(2).returning(|_| {
        Box::pin(std::future::ready(Ok(EmailSendResponse {
            status: 500,
            text: "Internal Server Error".into(),
        })))
    });
    let sut = make_sut(&clock, &storage, transport);

    // Act
    let first = sut.submit(JO_FORM.clone()).await;
    let second = sut.submit(JO_FORM.clone()).await;

    // Assert
    assert!(!first.success);
    assert!(!second.success);
    assert_ne!(second, rate_limited());
    assert_eq!(
        storage
            .get::<Vec<i64>>(RATE_LIMIT_STORAGE_KEY)
            .await
            .unwrap(),
        None
    );
    assert_eq!(sut.submission_stats().await.total_submissions, 2);
}

#[tokio::test]
async fn concurrent_submissions_pass_the_same_check() {
    // Arrange
    let clock = TestClock::new(*NOW);
    let storage = MemoryStorage::new();
    let sut = make_sut(&clock, &storage, accepting_transport(2));

    // Act
    let (first, second) = tokio::join!(sut.submit(JO_FORM.clone()), sut.submit(JO_FORM.clone()));

    // Assert
    assert!(first.success);
    assert!(second.success);
    assert_eq!(
        storage
            .get::<Vec<i64>>(RATE_LIMIT_STORAGE_KEY)
            .await
            .unwrap()
            .map(|timestamps| timestamps.len()),
        Some(2)
    );
}
