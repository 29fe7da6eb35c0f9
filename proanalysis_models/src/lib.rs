use std::sync::LazyLock;

use regex::Regex;

pub mod contact;
mod macros;
pub mod submission;

/// Grammar accepted for contact email addresses.
///
/// The local part may contain the RFC 5322 `atext` characters and dots. The
/// domain consists of dot-separated labels of up to 63 alphanumerics or
/// hyphens, where a label must neither start nor end with a hyphen.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .unwrap()
});

pub static REFERENCE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PBA-[0-9]+-[0-9]{1,3}$").unwrap());
