//! Time-bounded and scroll-bounded retry of UI actions.
//!
//! An *action* is any closure returning a future of `Result<T, E>`; it does a
//! complete find-and-interact sequence and reports failure on any step.

use crate::driver::{DriverError, UiDriver};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Interval used when a caller passes a zero interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout used by [`PollOptions::default`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Pause between a failed attempt and the next one.
    pub interval: Duration,
    /// Total budget measured from the first attempt.
    pub timeout: Duration,
    /// Abort a single attempt that runs longer than this.
    pub attempt_timeout: Option<Duration>,
}

impl PollOptions {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            timeout,
            attempt_timeout: None,
        }
    }

    /// Build from signed millisecond values; negatives clamp to zero.
    pub fn from_millis(interval_ms: i64, timeout_ms: i64) -> Self {
        let clamp = |ms: i64| Duration::from_millis(ms.max(0) as u64);
        Self::new(clamp(interval_ms), clamp(timeout_ms))
    }

    /// Exactly one attempt.
    pub fn once() -> Self {
        Self::new(DEFAULT_INTERVAL, Duration::ZERO)
    }

    pub fn with_attempt_timeout(mut self, limit: Duration) -> Self {
        self.attempt_timeout = Some(limit);
        self
    }

    fn effective_interval(&self) -> Duration {
        if self.interval.is_zero() {
            DEFAULT_INTERVAL
        } else {
            self.interval
        }
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, DEFAULT_TIMEOUT)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError<E> {
    #[error("{0}")]
    Failed(E),

    #[error("attempt did not finish within {0:?}")]
    AttemptTimedOut(Duration),
}

impl<E> PollError<E> {
    /// The action's own error, if the last attempt produced one.
    pub fn into_inner(self) -> Option<E> {
        match self {
            PollError::Failed(e) => Some(e),
            PollError::AttemptTimedOut(_) => None,
        }
    }
}

/// What a poll run did and how it ended.
#[derive(Debug)]
pub struct PollOutcome<T, E> {
    pub attempts: u32,
    pub elapsed: Duration,
    pub result: Result<T, PollError<E>>,
}

impl<T, E> PollOutcome<T, E> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, PollError<E>> {
        self.result
    }
}

/// Run `action` until it succeeds or `options.timeout` has elapsed.
///
/// A zero timeout, or an interval at least as long as the timeout, yields a
/// single attempt. On failure the last error is returned and `elapsed` is at
/// least the timeout.
pub async fn poll<T, E, F, Fut>(options: &PollOptions, action: F) -> PollOutcome<T, E>
where
    E: fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    poll_while(options, action, |_| true).await
}

/// Like [`poll`], but stops at the first error for which `retryable` returns
/// false.
pub async fn poll_while<T, E, F, Fut, R>(
    options: &PollOptions,
    mut action: F,
    retryable: R,
) -> PollOutcome<T, E>
where
    E: fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let start = Instant::now();
    let deadline = start + options.timeout;
    let interval = options.effective_interval();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let result = match options.attempt_timeout {
            Some(limit) => match tokio::time::timeout(limit, action()).await {
                Ok(r) => r.map_err(PollError::Failed),
                Err(_) => Err(PollError::AttemptTimedOut(limit)),
            },
            None => action().await.map_err(PollError::Failed),
        };

        let error = match result {
            Ok(value) => {
                return PollOutcome {
                    attempts,
                    elapsed: start.elapsed(),
                    result: Ok(value),
                };
            }
            Err(e) => e,
        };

        let give_up = match &error {
            PollError::Failed(e) => !retryable(e),
            PollError::AttemptTimedOut(_) => false,
        };
        let now = Instant::now();
        if give_up || now >= deadline {
            return PollOutcome {
                attempts,
                elapsed: start.elapsed(),
                result: Err(error),
            };
        }

        debug!(attempt = attempts, error = %error, "attempt failed, retrying");
        tokio::time::sleep(interval.min(deadline - now)).await;

        if Instant::now() >= deadline {
            return PollOutcome {
                attempts,
                elapsed: start.elapsed(),
                result: Err(error),
            };
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    /// Number of attempts; zero is treated as one.
    pub retries: u32,
    /// Wheel steps performed after each failed attempt.
    pub scrolls_per_retry: u32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            retries: 4,
            scrolls_per_retry: 100,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrollError<E> {
    #[error("{0}")]
    Action(E),

    #[error("scroll step failed: {0}")]
    Scroll(DriverError),
}

/// Attempt `action`; after each failure scroll down
/// `options.scrolls_per_retry` steps and try again, up to `options.retries`
/// attempts. Every failed attempt is followed by a full scroll sequence, so a
/// failing run performs exactly `retries` sequences. A scroll error aborts at
/// once.
pub async fn scroll_until_found<D, T, E, F, Fut>(
    driver: &D,
    options: &ScrollOptions,
    mut action: F,
) -> Result<T, ScrollError<E>>
where
    D: UiDriver + ?Sized,
    E: fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let retries = options.retries.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let error = match action().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        debug!(attempt, retries, error = %error, "target not reached, scrolling");

        for _ in 0..options.scrolls_per_retry {
            driver.scroll_down().await.map_err(ScrollError::Scroll)?;
        }

        if attempt >= retries {
            return Err(ScrollError::Action(error));
        }
    }
}
