//! Unit tests for the retry loop
//!
//! Time is paused so backoff sleeps advance the clock instantly and exactly.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::errors::{StoreError, StoreErrorKind};
use crate::services::retry::{execute, execute_if, execute_transient, RetryPolicy, Transient};

fn recording_policy(delays: Arc<Mutex<Vec<(u32, Duration, String)>>>) -> RetryPolicy {
    RetryPolicy::new().with_observer(move |attempt| {
        assert_eq!(attempt.max_retries, 3);
        delays
            .lock()
            .unwrap()
            .push((attempt.attempt, attempt.delay, attempt.error.to_string()));
    })
}

#[tokio::test(start_paused = true)]
async fn test_succeeds_after_two_failures() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let policy = recording_policy(observed.clone());
    let calls = AtomicU32::new(0);
    let start = Instant::now();

    let result = execute(&policy, || {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if call < 2 {
                Err(StoreError::unavailable(format!("attempt {}", call)))
            } else {
                Ok(42)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let observed = observed.lock().unwrap().clone();
    assert_eq!(
        observed,
        vec![
            (1, Duration::from_millis(1000), "unavailable: attempt 0".to_string()),
            (2, Duration::from_millis(2000), "unavailable: attempt 1".to_string()),
        ]
    );
    assert!(start.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_returns_last_error_unmodified() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new();

    let result: Result<(), StoreError> = execute(&policy, || {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        async move { Err(StoreError::new(StoreErrorKind::PermissionDenied, format!("denied {}", call))) }
    })
    .await;

    // Unconditional: even a permanent kind uses the whole budget
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(
        result.unwrap_err(),
        StoreError::new(StoreErrorKind::PermissionDenied, "denied 3")
    );
}

#[tokio::test(start_paused = true)]
async fn test_zero_retries_runs_once() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new().with_max_retries(0);

    let result: Result<(), StoreError> = execute(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(StoreError::unavailable("down")) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_first_success_never_sleeps() {
    let start = Instant::now();
    let result: Result<&str, StoreError> = execute(&RetryPolicy::new(), || async { Ok("done") }).await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_transient_executor_stops_on_permanent_failure() {
    let calls = AtomicU32::new(0);

    let result: Result<(), StoreError> = execute_transient(&RetryPolicy::transaction(), || {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if call == 0 {
                Err(StoreError::contention("deadlock"))
            } else {
                Err(StoreError::already_exists("credentials/a@example.com"))
            }
        }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(result.unwrap_err().kind, StoreErrorKind::AlreadyExists);
}

#[tokio::test(start_paused = true)]
async fn test_transient_executor_retries_full_budget() {
    let calls = AtomicU32::new(0);
    let start = Instant::now();

    let result: Result<(), StoreError> = execute_transient(&RetryPolicy::transaction(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(StoreError::contention("lock wait timeout")) }
    })
    .await;

    assert!(result.unwrap_err().is_transient());
    assert_eq!(calls.load(Ordering::SeqCst), 6);
    // 500 + 1000 + 2000 + 4000 + 5000
    assert!(start.elapsed() >= Duration::from_millis(12500));
}

#[tokio::test(start_paused = true)]
async fn test_custom_classifier() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new().with_initial_delay(Duration::from_millis(10));

    let result: Result<u32, String> = execute_if(
        &policy,
        || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match call {
                    0 => Err("retry me".to_string()),
                    _ => Err("fatal".to_string()),
                }
            }
        },
        |error: &String| error.starts_with("retry"),
    )
    .await;

    assert_eq!(result.unwrap_err(), "fatal");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_executions_are_independent() {
    let policy = RetryPolicy::new();
    let a_calls = AtomicU32::new(0);
    let b_calls = AtomicU32::new(0);

    let a = execute(&policy, || {
        let call = a_calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if call < 1 {
                Err(StoreError::unavailable("a"))
            } else {
                Ok("a")
            }
        }
    });
    let b = execute(&policy, || {
        let call = b_calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if call < 3 {
                Err(StoreError::unavailable("b"))
            } else {
                Ok("b")
            }
        }
    });

    let (a, b) = tokio::join!(a, b);
    assert_eq!(a.unwrap(), "a");
    assert_eq!(b.unwrap(), "b");
    assert_eq!(a_calls.load(Ordering::SeqCst), 2);
    assert_eq!(b_calls.load(Ordering::SeqCst), 4);
}
