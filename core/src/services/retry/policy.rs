//! Retry policy value object

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ks_shared::RetrySettings;

/// Details handed to the observer before each retry
#[derive(Clone, Copy)]
pub struct RetryAttempt<'a> {
    /// 1-based number of the retry about to happen
    pub attempt: u32,
    pub max_retries: u32,
    /// Backoff delay about to be slept
    pub delay: Duration,
    /// Failure of the attempt that just finished
    pub error: &'a dyn fmt::Display,
}

/// Callback invoked before each retry sleep
pub type RetryObserver = Arc<dyn Fn(RetryAttempt<'_>) + Send + Sync>;

/// Attempt budget and backoff shape for one class of operation
///
/// The delay before retry `n` (0-based) is
/// `min(initial_delay * multiplier^n, max_delay)`. An operation runs at most
/// `max_retries + 1` times.
#[derive(Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    observer: Option<RetryObserver>,
}

impl RetryPolicy {
    /// Default preset: 3 retries, 1s initial delay, 10s cap, doubling
    pub fn new() -> Self {
        Self::from_settings(&RetrySettings::standard())
    }

    /// Preset for store transactions: 5 retries, 500ms initial delay, 5s cap
    pub fn transaction() -> Self {
        Self::from_settings(&RetrySettings::transaction())
    }

    /// Preset for establishing the store connection
    pub fn connect() -> Self {
        Self::from_settings(&RetrySettings::connect())
    }

    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            multiplier: settings.multiplier,
            observer: None,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Attach a callback run before every retry sleep
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(RetryAttempt<'_>) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn observer(&self) -> Option<&RetryObserver> {
        self.observer.as_ref()
    }

    /// Backoff delay after the 0-based failed attempt `attempt`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let max_ms = self.max_delay.as_millis() as f64;
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let delay_ms = self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent);

        if !delay_ms.is_finite() || delay_ms >= max_ms {
            return self.max_delay;
        }
        Duration::from_millis(delay_ms.max(0.0) as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self::from_settings(settings)
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("initial_delay", &self.initial_delay)
            .field("max_delay", &self.max_delay)
            .field("multiplier", &self.multiplier)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
