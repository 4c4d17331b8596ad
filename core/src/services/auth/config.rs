//! Configuration for the account service

use ks_shared::RetryConfig;

use crate::services::retry::RetryPolicy;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Whether new accounts may be created
    pub allow_registration: bool,
    /// Longest accepted display name, in characters
    pub max_display_name_length: usize,
    /// Policy for single-document reads
    pub read_retry: RetryPolicy,
    /// Policy for the registration transaction
    pub transaction_retry: RetryPolicy,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
            max_display_name_length: 100,
            read_retry: RetryPolicy::new(),
            transaction_retry: RetryPolicy::transaction(),
        }
    }
}

impl AccountServiceConfig {
    /// Build the retry policies from the loaded presets
    pub fn from_retry_config(retry: &RetryConfig) -> Self {
        Self {
            read_retry: RetryPolicy::from_settings(&retry.default),
            transaction_retry: RetryPolicy::from_settings(&retry.transaction),
            ..Default::default()
        }
    }
}
