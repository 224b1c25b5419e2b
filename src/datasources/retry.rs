use crate::error::{GamedayError, Result};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// The final error is wrapped as `DataSourceUnavailable` with the attempt count.
    /// Errors that cannot succeed on a retry are returned after the first attempt.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::debug!("{}: attempt {}/{}", label, attempt, self.max_attempts());

            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => {
                    tracing::error!("{}: not retrying after attempt {}: {}", label, attempt, e);
                    return Err(e);
                }
                Err(e) if attempt <= self.max_retries => {
                    tracing::warn!(
                        "{}: attempt {} failed ({}), retrying in {}ms",
                        label,
                        attempt,
                        e,
                        self.delay.as_millis()
                    );
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                Err(e) => {
                    tracing::error!("{}: giving up after {} attempts: {}", label, attempt, e);
                    return Err(GamedayError::DataSourceUnavailable(format!(
                        "Failed after {} attempts: {}",
                        attempt, e
                    )));
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn no_delay(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::ZERO)
    }

    #[test]
    fn default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let result = no_delay(3)
            .run("test", || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(GamedayError::DataSourceUnavailable("flaky".into()))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let result: Result<()> = no_delay(3)
            .run("test", || {
                calls.set(calls.get() + 1);
                async { Err(GamedayError::DataSourceUnavailable("down".into())) }
            })
            .await;

        assert_eq!(calls.get(), 4);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Failed after 4 attempts"), "{}", message);
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let calls = Cell::new(0);
        let result: Result<()> = no_delay(0)
            .run("test", || {
                calls.set(calls.get() + 1);
                async { Err(GamedayError::DataSourceUnavailable("down".into())) }
            })
            .await;

        assert!(result.unwrap_err().to_string().contains("Failed after 1 attempts"));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn rejected_request_is_not_retried() {
        let calls = Cell::new(0);
        let result: Result<()> = no_delay(3)
            .run("test", || {
                calls.set(calls.get() + 1);
                async { Err(GamedayError::Rejected("401 Unauthorized".into())) }
            })
            .await;

        assert_eq!(calls.get(), 1);
        assert!(matches!(result, Err(GamedayError::Rejected(_))));
    }
}
