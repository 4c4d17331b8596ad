//! Retry/backoff configuration for store operations

use serde::{Deserialize, Serialize};

/// One retry preset: attempt budget and exponential backoff shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RetrySettings {
    /// Retries after the first attempt (total attempts = max_retries + 1)
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds
    pub initial_delay_ms: u64,

    /// Upper bound for any single delay in milliseconds
    pub max_delay_ms: u64,

    /// Growth factor applied per retry
    pub multiplier: f64,
}

impl RetrySettings {
    /// General-purpose preset for store reads and network hiccups
    pub fn standard() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 10000,
            multiplier: 2.0,
        }
    }

    /// Preset tuned for transaction lock contention
    pub fn transaction() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 500,
            max_delay_ms: 5000,
            multiplier: 2.0,
        }
    }

    /// Preset for establishing the store connection at startup
    pub fn connect() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            multiplier: 2.0,
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self::standard()
    }
}

/// All retry presets used by the application
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Identity loads and other single-document reads
    pub default: RetrySettings,

    /// Multi-document store transactions
    pub transaction: RetrySettings,

    /// Store bootstrap
    pub connect: RetrySettings,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            default: RetrySettings::standard(),
            transaction: RetrySettings::transaction(),
            connect: RetrySettings::connect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let config = RetryConfig::default();
        assert_eq!(config.default.max_retries, 3);
        assert_eq!(config.default.initial_delay_ms, 1000);
        assert_eq!(config.default.max_delay_ms, 10000);

        assert_eq!(config.transaction.max_retries, 5);
        assert_eq!(config.transaction.initial_delay_ms, 500);
        assert_eq!(config.transaction.max_delay_ms, 5000);
    }

    #[test]
    fn test_partial_deserialize_keeps_other_presets() {
        let json = serde_json::json!({
            "transaction": { "max_retries": 8, "initial_delay_ms": 100, "max_delay_ms": 800, "multiplier": 1.5 }
        });
        let config: RetryConfig = serde_json::from_value(json).unwrap();

        assert_eq!(config.transaction.max_retries, 8);
        assert_eq!(config.default, RetrySettings::standard());
    }
}
