/// Returns the version string reported by the CLI and sent in the User-Agent.
pub fn proanalysis_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builder-style helpers available on every value.
pub trait Apply: Sized {
    /// Mutates `self` in place and returns it.
    ///
    /// ```rust
    /// # use proanalysis_utils::Apply;
    /// let subjects = vec!["Partnership Opportunity", "Evidence Analysis Inquiry"]
    ///     .with(|subjects| subjects.sort());
    /// assert_eq!(subjects[0], "Evidence Analysis Inquiry");
    /// ```
    fn with<X>(mut self, f: impl FnOnce(&mut Self) -> X) -> Self {
        f(&mut self);
        self
    }

    /// Passes `self` through `f` together with the contained value if `value`
    /// is present, otherwise returns `self` unchanged.
    ///
    /// ```rust
    /// # use proanalysis_utils::Apply;
    /// # use std::time::Duration;
    /// let timeout = Some(Duration::from_secs(30));
    /// let total = Duration::ZERO.apply_map(timeout, |total, timeout| total + timeout);
    /// assert_eq!(total, Duration::from_secs(30));
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}

/// Asserts that an expression matches a pattern, with an optional guard.
///
/// ```rust
/// # use proanalysis_utils::assert_matches;
/// let result: Result<u16, String> = Ok(503);
/// assert_matches!(result, Ok(status) if status >= 500);
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match $expr {
            $pat $(if $guard)? => {}
            ref value => ::core::panic!(
                "assertion failed: `{:?}` does not match `{}`",
                value,
                ::core::stringify!($pat $(if $guard)?),
            ),
        }
    };
}
