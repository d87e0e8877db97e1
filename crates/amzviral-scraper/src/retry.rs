//! Linear backoff retry for page fetches.
//!
//! Every error is retried: network failures, non-2xx statuses, and detected
//! anti-bot pages all look the same from the caller's side once attempts run
//! out, and the last error observed is what gets returned.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Attempt count and delay units for [`retry_with_backoff`].
///
/// Attempt `n` (1-based) waits `n * attempt_delay` before it is issued,
/// including the first one. A failed attempt that is not the last waits a
/// further `n * backoff_delay` before the next attempt.
///
/// | Attempt | Pre-attempt wait | Wait after failure |
/// |---------|------------------|--------------------|
/// | 1       | 1 × 1000 ms      | 1 × 2000 ms        |
/// | 2       | 2 × 1000 ms      | 2 × 2000 ms        |
/// | 3       | 3 × 1000 ms      | none (error returned) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub attempt_delay: Duration,
    pub backoff_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_delay: Duration::from_millis(1000),
            backoff_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    /// A policy with no delays, for tests and local tooling.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            attempt_delay: Duration::ZERO,
            backoff_delay: Duration::ZERO,
        }
    }
}

/// Runs `operation` up to `policy.max_attempts` times, passing the 1-based
/// attempt number, and returns the first success or the last error.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        tokio::time::sleep(policy.attempt_delay * attempt).await;

        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                tracing::warn!(attempt, max_attempts, error = %err, "fetch failed; giving up");
                return Err(err);
            }
            Err(err) => {
                let delay = policy.backoff_delay * attempt;
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "fetch attempt failed; backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }

        attempt += 1;
    }
}
