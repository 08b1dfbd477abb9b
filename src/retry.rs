//! Bounded retry with linear backoff.
//!
//! [`RetryPolicy::execute`] runs an async operation up to `max_attempts`
//! times. After failed attempt `n` (1-based) it sleeps `base_delay * n`
//! before trying again; there is no sleep after the final attempt.
//! Errors that are not [`crate::ResearchError::is_retryable`] end the loop at once.

use std::future::Future;
use std::time::Duration;

use crate::error::Result;

/// Default number of attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff unit.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Retry parameters for one operation.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use web_research::retry::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.delay_after_attempt(2), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound on operation invocations. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Backoff unit multiplied by the attempt index.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Sleep inserted after failed attempt `attempt` (1-based).
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Run `operation` until it succeeds, fails non-retryably, or attempts run out.
    ///
    /// The closure receives the 1-based attempt index. On exhaustion the
    /// last error is returned.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt >= attempts => {
                    tracing::debug!(attempt, error = %err, "retries exhausted");
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_after_attempt(attempt);
                    tracing::warn!(attempt, ?delay, error = %err, "attempt failed, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
