//! Retry loop

use std::fmt::Display;
use std::future::Future;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::classifier::Transient;
use super::policy::{RetryAttempt, RetryPolicy};

/// Run `operation` until it succeeds or `max_retries` retries have failed.
///
/// Every failure is retried regardless of its kind.
pub async fn execute<F, Fut, T, E>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    execute_if(policy, operation, |_| true).await
}

/// Like [`execute`], but retries only the failures `should_retry` accepts.
/// A rejected failure is returned immediately.
pub async fn execute_if<F, Fut, T, E, C>(
    policy: &RetryPolicy,
    mut operation: F,
    should_retry: C,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    C: Fn(&E) -> bool,
{
    let mut attempt: u32 = 0;

    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !should_retry(&error) {
            debug!(attempt = attempt + 1, error = %error, "Failure is not retryable");
            return Err(error);
        }

        if attempt >= policy.max_retries {
            warn!(
                attempts = attempt + 1,
                error = %error,
                "Retry budget exhausted"
            );
            return Err(error);
        }

        let delay = policy.delay_for_attempt(attempt);
        warn!(
            attempt = attempt + 1,
            max_retries = policy.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Operation failed, retrying"
        );

        if let Some(observer) = policy.observer() {
            observer(RetryAttempt {
                attempt: attempt + 1,
                max_retries: policy.max_retries,
                delay,
                error: &error,
            });
        }

        sleep(delay).await;
        attempt += 1;
    }
}

/// Classifier-gated executor: only [`Transient`] failures are retried
pub async fn execute_transient<F, Fut, T, E>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display + Transient,
{
    execute_if(policy, operation, |error: &E| error.is_transient()).await
}
