//! Retry logic.
//!
//! # Attempt State Machine
//! ```text
//! Idle → Sending → Success
//!                → TransientFailure → Idle     (attempts remain, after backoff)
//!                → TransientFailure → Failed   (attempts exhausted, last error returned)
//!                → FatalFailure     → Failed   (returned immediately)
//! ```
//!
//! Attempts are strictly sequential: attempt N+1 never starts before the
//! failure of attempt N has been observed.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::resilience::backoff::calculate_backoff;

/// Classifies an error as retryable or not.
pub trait Retryable {
    /// True for failures worth another attempt (timeouts, connection errors).
    fn is_transient(&self) -> bool;
}

/// Bounded retry policy: `max_retries + 1` attempts in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay increment per failed attempt.
    pub step: Duration,
    /// Upper bound on a single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_STEP: Duration = Duration::from_millis(500);
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(2000);

    /// Policy with the default 0.5s step capped at 2s.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            step: Self::DEFAULT_STEP,
            max_delay: Self::DEFAULT_MAX_DELAY,
        }
    }

    /// Policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Total number of attempts.
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait after the `failed_attempt`-th attempt (1-based).
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        calculate_backoff(
            failed_attempt,
            self.step.as_millis() as u64,
            self.max_delay.as_millis() as u64,
        )
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Run `op` until it succeeds, fails fatally, or the policy is exhausted.
///
/// `op` receives the 1-based attempt number. On exhaustion the error of the
/// last attempt is returned unchanged.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < attempts => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::debug!(
                    attempt,
                    max_attempts = attempts,
                    transient = err.is_transient(),
                    error = %err,
                    "Giving up"
                );
                return Err(err);
            }
        }
    }
}
