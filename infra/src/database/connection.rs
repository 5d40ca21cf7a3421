//! MySQL pool shared by the user and OTP repositories

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;

use og_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Tables the repositories read and write
pub const REQUIRED_TABLES: [&str; 2] = ["users", "otp_records"];

/// Connections are recycled after this long regardless of activity
const MAX_CONNECTION_LIFETIME: Duration = Duration::from_secs(30 * 60);

#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Open the pool. The URL is validated before any connection is attempted.
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(MAX_CONNECTION_LIFETIME)
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "db_pool_failed", "Could not open MySQL pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            event = "db_pool_ready",
            "MySQL pool ready"
        );
        Ok(Self { pool, config })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Run `SELECT 1` against the pool
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(row.0 == 1)
    }

    /// Names from [`REQUIRED_TABLES`] missing in the connected schema
    pub async fn missing_tables(&self) -> Result<Vec<&'static str>, InfrastructureError> {
        let present: Vec<(String,)> = sqlx::query_as(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name IN (?, ?)",
        )
        .bind(REQUIRED_TABLES[0])
        .bind(REQUIRED_TABLES[1])
        .fetch_all(&self.pool)
        .await?;

        let missing: Vec<&'static str> = REQUIRED_TABLES
            .into_iter()
            .filter(|table| !present.iter().any(|(name,)| name.eq_ignore_ascii_case(table)))
            .collect();
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, event = "db_schema_incomplete", "OtpGate tables missing, run migrations");
        }
        Ok(missing)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle() as u32,
            max_connections: self.config.max_connections,
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(event = "db_pool_closed", "MySQL pool closed");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
}

impl PoolStatistics {
    pub fn in_use(&self) -> u32 {
        self.connections.saturating_sub(self.idle_connections)
    }

    /// Every slot is open and none is idle
    pub fn is_saturated(&self) -> bool {
        self.connections >= self.max_connections && self.idle_connections == 0
    }
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pool {}/{} open, {} in use, {} idle",
            self.connections,
            self.max_connections,
            self.in_use(),
            self.idle_connections
        )
    }
}
