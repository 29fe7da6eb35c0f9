use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use proanalysis_models::submission::ReferenceNumber;

pub mod contact;

pub const NOW_MILLIS: i64 = 1_760_000_000_000;

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| DateTime::from_timestamp_millis(NOW_MILLIS).unwrap());

pub static REFERENCE_NUMBER_1: LazyLock<ReferenceNumber> =
    LazyLock::new(|| "PBA-1760000000000-42".try_into().unwrap());
