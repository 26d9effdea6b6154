//! Deadlines for blocking dialog calls.

use std::time::{Duration, Instant};

use crate::error::{DialogError, Result};

/// Point in time after which a dialog is force-closed.
///
/// An unbounded deadline never elapses. A deadline is created fresh for
/// every dialog call and copied into whatever enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline {
    bound: Option<(Instant, Duration)>,
}

impl Deadline {
    /// A deadline that never elapses.
    pub fn none() -> Self {
        Self { bound: None }
    }

    /// A deadline `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Self {
            bound: Some((Instant::now(), limit)),
        }
    }

    /// `Deadline::after` for `Some`, unbounded for `None`.
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map_or_else(Self::none, Self::after)
    }

    /// Whether the deadline can elapse at all.
    pub fn is_bounded(&self) -> bool {
        self.bound.is_some()
    }

    /// The configured limit.
    pub fn limit(&self) -> Option<Duration> {
        self.bound.map(|(_, limit)| limit)
    }

    /// Time left; `None` when unbounded, zero once elapsed.
    pub fn remaining(&self) -> Option<Duration> {
        self.bound
            .map(|(start, limit)| limit.saturating_sub(start.elapsed()))
    }

    /// Whether the deadline has passed.
    pub fn is_elapsed(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// The error reported for this deadline.
    pub fn timeout_error(&self) -> DialogError {
        DialogError::timeout(self.limit().unwrap_or_default())
    }

    /// Fail if the deadline already passed.
    pub fn check(&self) -> Result<()> {
        if self.is_elapsed() {
            Err(self.timeout_error())
        } else {
            Ok(())
        }
    }

    /// Re-check the deadline after a blocking call returned.
    ///
    /// Once the deadline has passed the outcome is a timeout, whatever the
    /// backend reported while it was being torn down. A late answer counts
    /// as a timeout too: an `Ok` that arrives after the deadline is dropped.
    pub fn resolve<T>(&self, outcome: Result<T>) -> Result<T> {
        if self.is_elapsed() {
            return Err(self.timeout_error());
        }
        outcome
    }
}

static_assertions::assert_impl_all!(Deadline: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_elapses() {
        let deadline = Deadline::none();
        assert!(!deadline.is_bounded());
        assert_eq!(deadline.remaining(), None);
        assert!(deadline.check().is_ok());
    }

    #[test]
    fn test_zero_limit_is_elapsed() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.is_elapsed());
        assert!(deadline.check().unwrap_err().is_timeout());
    }

    #[test]
    fn test_resolve_turns_failures_into_timeouts() {
        let deadline = Deadline::after(Duration::ZERO);
        let outcome: Result<()> = Err(DialogError::output("killed"));
        assert!(deadline.resolve(outcome).unwrap_err().is_timeout());

        let deadline = Deadline::after(Duration::from_secs(60));
        let outcome: Result<()> = Err(DialogError::output("broken"));
        assert!(!deadline.resolve(outcome).unwrap_err().is_timeout());
        assert_eq!(deadline.resolve(Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_late_answer_is_timeout() {
        let deadline = Deadline::after(Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(30));
        let err = deadline.resolve(Ok("clicked")).unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Dialog timed out after 10ms");
    }
}
