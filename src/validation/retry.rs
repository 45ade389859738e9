//! Engine-level retry policy.
//!
//! A retried probe is a small state machine:
//!
//! ```text
//! Attempting(n) --alive--------------------------> Success
//! Attempting(n) --4xx / invalid------------------> TerminalFailure
//! Attempting(n) --other failure, n < retries-----> Attempting(n + 1)
//! Attempting(n) --other failure, n == retries----> TerminalFailure
//! ```
//!
//! Waiting between attempts grows exponentially from the base delay.

use log::debug;
use std::future::Future;
use tokio::time::{Duration, sleep};

use crate::core::constants::{http_status, timeouts};
use crate::core::error::ProbeFailure;
use crate::core::types::{LinkStatus, LivenessResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    /// About to run attempt `n` (zero-based)
    Attempting(u32),
    Success(LivenessResult),
    TerminalFailure(LivenessResult),
}

/// Fields remembered across failed attempts.
#[derive(Debug, Default)]
struct Observed {
    last_status: Option<u16>,
    last_description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: u32,
    base_delay: Duration,
    factor: u32,
}

impl RetryPolicy {
    /// `retries` attempts after the first, waiting `base_delay` before the
    /// first retry.
    pub fn new(retries: u32, base_delay: Duration) -> Self {
        Self {
            retries,
            base_delay,
            factor: timeouts::BACKOFF_FACTOR,
        }
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Delay before attempt `attempt` (the first retry is attempt 1).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        match attempt {
            0 => Duration::ZERO,
            n => self
                .base_delay
                .saturating_mul(self.factor.saturating_pow(n - 1)),
        }
    }

    /// Whether `result` ends the retry loop no matter how many attempts remain.
    pub fn is_terminal(result: &LivenessResult) -> bool {
        match result.status {
            LinkStatus::Alive | LinkStatus::Invalid => true,
            LinkStatus::Dead | LinkStatus::Error => {
                result.status_code.is_some_and(http_status::is_client_error)
            }
        }
    }

    /// Run `attempt` until it succeeds, fails definitively, or the retries are
    /// used up.
    pub async fn run<F, Fut>(&self, url: &str, mut attempt: F) -> LivenessResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = LivenessResult>,
    {
        let mut observed = Observed::default();
        let mut state = RetryState::Attempting(0);

        loop {
            state = match state {
                RetryState::Attempting(n) => {
                    if n > 0 {
                        let delay = self.delay_before(n);
                        debug!("{url}: retry {n}/{} in {}ms", self.retries, delay.as_millis());
                        sleep(delay).await;
                    }
                    let result = attempt().await;
                    self.transition(url, n, result, &mut observed)
                }
                RetryState::Success(result) | RetryState::TerminalFailure(result) => {
                    return result;
                }
            };
        }
    }

    fn transition(
        &self,
        url: &str,
        attempt: u32,
        result: LivenessResult,
        observed: &mut Observed,
    ) -> RetryState {
        if result.is_alive() {
            return RetryState::Success(result);
        }
        if Self::is_terminal(&result) {
            return RetryState::TerminalFailure(result);
        }

        observed.last_status = result.status_code.or(observed.last_status);
        observed.last_description = result.description;

        if attempt < self.retries {
            return RetryState::Attempting(attempt + 1);
        }

        let failure = ProbeFailure::RetryExhausted {
            attempts: attempt + 1,
            last_status: observed.last_status,
        };
        debug!("{url}: {failure}");

        let exhausted = match observed.last_status {
            Some(code) => LivenessResult::dead(Some(code)),
            None => LivenessResult::error(observed.last_description.take()),
        };
        RetryState::TerminalFailure(exhausted)
    }
}
