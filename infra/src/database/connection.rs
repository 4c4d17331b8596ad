//! Database connection pool management
//!
//! Connection pooling using SQLx with MySQL. The pool is created once at
//! startup; transient connection failures during that bootstrap are retried.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use ks_core::services::retry::{execute, RetryPolicy};
use ks_shared::StoreConfig;

use crate::InfrastructureError;

/// URL schemes accepted for the MySQL store
const SUPPORTED_SCHEMES: &[&str] = &["mysql", "mariadb"];

/// Database connection pool wrapper
///
/// Manages the MySQL connection pool with configurable settings
/// for connection limits, timeouts, and health checks.
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx MySQL connection pool
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// Every connection failure is retried under `retry`; a URL that is not
    /// a MySQL URL fails immediately.
    pub async fn connect(config: &StoreConfig, retry: &RetryPolicy) -> Result<Self, InfrastructureError> {
        tracing::info!(
            url = %config.masked_url(),
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let connect_options = Self::connect_options(&config.url)?;
        let pool_options = Self::pool_options(config);

        let pool = execute(retry, || {
            pool_options.clone().connect_with(connect_options.clone())
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create database pool");
            InfrastructureError::Database(e)
        })?;

        tracing::info!("Database connection pool created successfully");
        Ok(Self { pool })
    }

    /// Parse connection options from URL and configure statement logging
    pub fn connect_options(url: &str) -> Result<MySqlConnectOptions, InfrastructureError> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme);
        if !matches!(scheme, Some(s) if SUPPORTED_SCHEMES.contains(&s)) {
            return Err(InfrastructureError::Config(format!(
                "Invalid database URL: scheme must be one of {}",
                SUPPORTED_SCHEMES.join(", ")
            )));
        }

        let options = MySqlConnectOptions::from_str(url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        Ok(options
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1)))
    }

    fn pool_options(config: &StoreConfig) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Get connection pool statistics
    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Close all connections in the pool
    ///
    /// This should be called during application shutdown.
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

/// Connection pool statistics
#[derive(Debug, Clone)]
pub struct PoolStatistics {
    /// Total number of connections in the pool
    pub connections: u32,
    /// Number of idle connections
    pub idle_connections: usize,
    /// Maximum allowed connections
    pub max_connections: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pool Stats: {}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
