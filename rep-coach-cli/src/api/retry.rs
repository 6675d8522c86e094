use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use super::ApiError;

/// Attempt budget and exponential backoff for chatbot requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 250,
            max_delay_ms: 4000,
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    /// No waiting between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            backoff_factor: 1.0,
        }
    }

    /// Wait before the attempt following failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let ms = self.initial_delay_ms as f64 * self.backoff_factor.powi(exponent);
        Duration::from_millis((ms as u64).min(self.max_delay_ms))
    }

    /// Run `request` until it succeeds, fails permanently, or the budget runs out
    ///
    /// Only transient `ApiError`s (rate limits, 5xx, network) and errors of
    /// other types are retried.
    pub async fn execute<F, Fut, T>(&self, mut request: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let err = match request().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if !should_retry(&err) {
                return Err(err);
            }

            if attempt >= self.max_attempts {
                tracing::warn!("Giving up after {} attempts: {}", attempt, err);
                return Err(err);
            }

            let delay = self.delay_after(attempt);
            tracing::debug!("Attempt {} failed, retrying in {:?}: {}", attempt, delay, err);
            sleep(delay).await;
        }
    }
}

fn should_retry(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .map_or(true, ApiError::is_transient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_schedule_is_capped() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_after(1), Duration::from_millis(250));
        assert_eq!(config.delay_after(2), Duration::from_millis(500));
        assert_eq!(config.delay_after(3), Duration::from_millis(1000));
        assert_eq!(config.delay_after(10), Duration::from_millis(4000));
    }

    #[tokio::test]
    async fn test_rate_limit_then_answer() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let answer = RetryConfig::immediate(3)
            .execute(move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ApiError::RateLimited("quota".into()).into())
                } else {
                    Ok("drink water".to_string())
                }
            })
            .await
            .unwrap();

        assert_eq!(answer, "drink water");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_budget_is_total_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<()> = RetryConfig::immediate(2)
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::NetworkError("connection reset".into()).into())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<()> = RetryConfig::immediate(5)
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::BadRequest("invalid prompt".into()).into())
            })
            .await;

        assert!(matches!(
            result.unwrap_err().downcast_ref::<ApiError>(),
            Some(ApiError::BadRequest(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_untyped_errors_are_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<()> = RetryConfig::immediate(3)
            .execute(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("malformed body"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
