use std::sync::Arc;

use proanalysis_core_contact_contracts::{
    rate_limit::MockContactRateLimitService, submission_log::MockContactSubmissionLogService,
};
use proanalysis_demo::contact::{CONTACT_INFO, FALLBACK_EMAIL, TO_EMAIL};
use proanalysis_email_contracts::MockEmailTransport;
use proanalysis_shared_contracts::{reference::MockReferenceService, time::MockTimeService};

use crate::{ContactServiceConfig, ContactServiceImpl};

mod limits;

type Sut = ContactServiceImpl<
    MockTimeService,
    MockReferenceService,
    MockContactRateLimitService,
    MockContactSubmissionLogService,
    MockEmailTransport,
>;

fn config() -> ContactServiceConfig {
    ContactServiceConfig {
        to_email: TO_EMAIL.into(),
        fallback_email: FALLBACK_EMAIL.into(),
        info: Arc::new(CONTACT_INFO.clone()),
    }
}
