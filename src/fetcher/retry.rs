use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::{HeadlinerError, Result};
use crate::config::interval;

/// Bounded retry with a uniformly random pause between attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first one (default: 5)
    pub max_attempts: u32,

    /// Shortest pause between attempts (default: 0s)
    #[serde(with = "interval::human")]
    pub backoff_min: Duration,

    /// Longest pause between attempts (default: 5s)
    #[serde(with = "interval::human")]
    pub backoff_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_min: Duration::ZERO,
            backoff_max: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// No pauses; used where the caller wants retries without waiting.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_min: Duration::ZERO,
            backoff_max: Duration::ZERO,
        }
    }

    /// Random pause in `[backoff_min, backoff_max]`.
    pub fn delay(&self) -> Duration {
        let min = self.backoff_min.as_millis() as u64;
        let max = self.backoff_max.as_millis() as u64;
        if max <= min {
            return self.backoff_min;
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }

    /// Runs `op` until it succeeds, fails with a non-transient error, or the
    /// attempt budget is spent. `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let budget = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() => {
                    if attempt >= budget {
                        return Err(HeadlinerError::Exhausted {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }

                    let delay = self.delay();
                    debug!(attempt, ?delay, error = %e, "transient failure, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
