//! Retry with exponential backoff
//!
//! The policy is plain data and the loop is plain control flow: call the
//! operation, and on a transient error sleep `delay_for(attempt)` before the
//! next attempt, up to `max_tries` attempts in total. The last transient
//! error is returned unchanged once the budget is spent.
//!
//! Sleeping goes through the [`Sleeper`] trait so tests can observe delays
//! without waiting for them.

use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;
#[cfg(test)]
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

/// Default number of attempts for a fetch
pub const DEFAULT_MAX_TRIES: u32 = 15;

/// Backoff and attempt budget for the retry envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_tries: u32,
    /// Delay before the second attempt
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each attempt
    pub factor: u32,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            initial_delay: Duration::from_secs(1),
            factor: 2,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn single_attempt() -> Self {
        Self {
            max_tries: 1,
            ..Self::default()
        }
    }

    /// Override the attempt budget
    #[must_use]
    pub fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let multiplier = self.factor.saturating_pow(exponent);
        std::cmp::min(
            self.initial_delay.saturating_mul(multiplier),
            self.max_delay,
        )
    }
}

/// Sleep primitive used between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real sleeping on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately and remembers every requested delay
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

#[cfg(test)]
impl RecordingSleeper {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order
    pub fn delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.push(duration);
        }
    }
}

/// Run `op` under `policy`, retrying transient errors
///
/// `op` receives the 1-based attempt number. Non-transient errors are
/// returned after the attempt that produced them.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, sleeper: &dyn Sleeper, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_tries = policy.max_tries.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_tries => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "Transient failure, attempt {}/{}, retrying in {:?}: {}",
                    attempt, max_tries, delay, e
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> Error {
        Error::from_status(503, "busy")
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_tries, 15);
        assert_eq!(policy.initial_delay, Duration::from_secs(1));
        assert_eq!(policy.factor, 2);
        assert_eq!(policy.max_delay, Duration::from_secs(10));
        assert_eq!(RetryPolicy::single_attempt().max_tries, 1);
    }

    #[test]
    fn test_delay_doubles_then_caps() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (1..=6).map(|a| policy.delay_for(a).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 10, 10]);
        assert_eq!(policy.delay_for(100), Duration::from_secs(10));
    }

    #[test]
    fn test_retry_succeeds_after_transient_failures() {
        let sleeper = RecordingSleeper::new();
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default().with_max_tries(4);

        let result = tokio_test::block_on(retry(&policy, &sleeper, |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 3 {
                    Err(transient())
                } else {
                    Ok("done")
                }
            }
        }));

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(
            sleeper.delays(),
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }

    #[tokio::test]
    async fn test_retry_exhaustion_returns_last_error() {
        let sleeper = RecordingSleeper::new();
        let policy = RetryPolicy::default().with_max_tries(2);

        let result: Result<()> = retry(&policy, &sleeper, |attempt| async move {
            Err(Error::from_status(500, &format!("attempt {attempt}")))
        })
        .await;

        match result.unwrap_err() {
            Error::TransientApi { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "attempt 2");
            }
            other => panic!("expected TransientApi, got {other:?}"),
        }
        assert_eq!(sleeper.delays().len(), 1);
    }

    #[tokio::test]
    async fn test_client_error_not_retried() {
        let sleeper = RecordingSleeper::new();
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result: Result<()> = retry(&policy, &sleeper, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::from_status(400, "bad")) }
        })
        .await;

        assert!(matches!(result, Err(Error::ClientApi { status: 400, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_zero_max_tries_still_runs_once() {
        let sleeper = RecordingSleeper::new();
        let policy = RetryPolicy::default().with_max_tries(0);

        let result = retry(&policy, &sleeper, |_| async { Ok::<_, Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_tokio_sleeper_waits() {
        let start = std::time::Instant::now();
        TokioSleeper.sleep(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
