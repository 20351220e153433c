// src/error_recovery.rs
//! Retry policy with exponential backoff for API operations.

use crate::constants::{DEFAULT_BACKOFF_BASE_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_MS};
use std::time::Duration;

/// How long one logical request may take and how often it is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per request, at least one.
    pub max_attempts: u32,
    /// Overall deadline covering every attempt and every wait.
    pub timeout: Duration,
    /// Unit of the backoff schedule.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (1-based): `base * 2^attempt`.
    ///
    /// No jitter. Saturates instead of overflowing for absurd attempt counts.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor)
    }

    /// Whether another attempt follows attempt `attempt`.
    pub fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(8));
    }

    #[test]
    fn backoff_follows_custom_base() {
        let policy = RetryPolicy {
            backoff_base: Duration::from_millis(10),
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(20));
        assert_eq!(policy.backoff_delay(4), Duration::from_millis(160));
    }

    #[test]
    fn backoff_saturates() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.backoff_delay(64),
            Duration::from_secs(1).saturating_mul(u32::MAX)
        );
    }

    #[test]
    fn last_attempt_has_no_successor() {
        let policy = RetryPolicy::default();
        assert!(policy.has_attempts_after(1));
        assert!(policy.has_attempts_after(2));
        assert!(!policy.has_attempts_after(3));
    }
}
