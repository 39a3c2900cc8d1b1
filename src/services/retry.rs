/// Retry policy with exponential backoff for catalog fetches
use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Initial backoff duration
    pub initial_backoff: Duration,
    /// Maximum backoff duration
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

/// Whether a failed catalog call is worth repeating
///
/// Client errors and missing movies will not change on retry.
fn is_retryable(error: &AppError) -> bool {
    !matches!(
        error,
        AppError::InvalidInput(_) | AppError::NotFound(_) | AppError::Recommendation(_)
    )
}

/// Runs `f` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent. The last error is returned.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, operation: &str, mut f: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 0;
    let mut backoff = config.initial_backoff;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if !is_retryable(&e) => return Err(e),
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::warn!(
                        operation = %operation,
                        max_retries = config.max_retries,
                        error = %e,
                        "Max retries reached"
                    );
                    return Err(e);
                }

                tracing::warn!(
                    operation = %operation,
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = backoff.as_millis() as u64,
                    error = %e,
                    "Retrying after failure"
                );

                tokio::time::sleep(backoff).await;

                backoff = Duration::from_millis(
                    ((backoff.as_millis() as f64 * config.backoff_multiplier)
                        .min(config.max_backoff.as_millis() as f64)) as u64,
                );
            }
        }
    }
}
