//! Bounded retry for transient generation failures.
//!
//! Only failures that [`GenerationError::is_retryable`] accepts are retried;
//! authentication and malformed-request errors surface on the first attempt.
//! A rate limit carrying `Retry-After` waits at least that long (capped at
//! the policy's `max_delay`) before the next attempt.

use crate::error::GenerationError;
use crate::traits::{ChatClient, ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    pub fn with_delays(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_delay = initial;
        self.max_delay = max;
        self
    }

    /// Waits between attempts: initial, 2x initial, ... capped at `max_delay`
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let factor = (self.initial_delay.as_millis() / 2).max(1) as u64;
        let zero = self.initial_delay.is_zero();
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(self.max_delay)
            .map(move |delay| if zero { Duration::ZERO } else { delay })
            .take(self.max_attempts.saturating_sub(1))
    }
}

/// Wraps any [`ChatClient`] with a [`RetryPolicy`].
pub struct RetryingClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: ChatClient> RetryingClient<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<C: ChatClient> ChatClient for RetryingClient<C> {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, GenerationError> {
        let backoff: Vec<Duration> = self.policy.delays().collect();
        let retry_after: Mutex<Option<Duration>> = Mutex::new(None);
        let mut attempt = 0usize;

        RetryIf::start(
            backoff.clone(),
            || {
                attempt += 1;
                let request = request.clone();
                let current = attempt;
                let extra = self.extra_wait(&retry_after, backoff.get(current.saturating_sub(2)));
                async move {
                    if !extra.is_zero() {
                        tokio::time::sleep(extra).await;
                    }
                    if current > 1 {
                        tracing::info!(attempt = current, "Retrying chat completion");
                    }
                    self.inner.chat(request).await
                }
            },
            |err: &GenerationError| {
                let retry = err.is_retryable();
                if retry {
                    tracing::warn!(error = %err, "Transient generation failure");
                    if let GenerationError::RateLimited { retry_after: Some(wait) } = err {
                        if let Ok(mut slot) = retry_after.lock() {
                            *slot = Some(*wait);
                        }
                    }
                }
                retry
            },
        )
        .await
    }
}

impl<C> RetryingClient<C> {
    /// Time still owed to a server `Retry-After` once the backoff delay has passed
    fn extra_wait(&self, retry_after: &Mutex<Option<Duration>>, backoff: Option<&Duration>) -> Duration {
        let requested = match retry_after.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        match requested {
            Some(wait) => wait
                .min(self.policy.max_delay)
                .saturating_sub(backoff.copied().unwrap_or_default()),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let delays: Vec<_> = RetryPolicy::default().delays().collect();
        assert_eq!(delays, vec![Duration::from_secs(4), Duration::from_secs(8)]);
    }

    #[test]
    fn test_delays_capped() {
        let delays: Vec<_> = RetryPolicy::new(5).delays().collect();
        assert_eq!(delays.len(), 4);
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(10)));
        assert_eq!(delays[3], Duration::from_secs(10));
    }

    #[test]
    fn test_single_attempt_has_no_delays() {
        assert_eq!(RetryPolicy::new(1).delays().count(), 0);
        assert_eq!(RetryPolicy::new(0).delays().count(), 0);
    }

    struct Unused;

    #[async_trait]
    impl ChatClient for Unused {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, GenerationError> {
            unreachable!()
        }
    }

    #[test]
    fn test_retry_after_tops_up_backoff() {
        let client = RetryingClient::new(Unused, RetryPolicy::default());
        let hint = Mutex::new(Some(Duration::from_secs(7)));
        let extra = client.extra_wait(&hint, Some(&Duration::from_secs(4)));
        assert_eq!(extra, Duration::from_secs(3));
        assert!(hint.lock().unwrap().is_none());
    }

    #[test]
    fn test_retry_after_capped_at_max_delay() {
        let client = RetryingClient::new(Unused, RetryPolicy::default());
        let hint = Mutex::new(Some(Duration::from_secs(120)));
        let extra = client.extra_wait(&hint, Some(&Duration::from_secs(4)));
        assert_eq!(extra, Duration::from_secs(6));
    }

    #[test]
    fn test_no_retry_after_adds_nothing() {
        let client = RetryingClient::new(Unused, RetryPolicy::default());
        let hint = Mutex::new(None);
        assert_eq!(client.extra_wait(&hint, Some(&Duration::from_secs(4))), Duration::ZERO);
    }
}
