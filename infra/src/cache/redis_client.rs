//! Redis client with connection retry and hash operations used by the
//! session store.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use og_shared::config::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client over a multiplexed connection
///
/// Clones share the connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
    /// Maximum number of attempts per operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect with the default retry policy (3 attempts, 100ms base delay)
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout),
            max_retries,
            retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let outcome = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::General(format!(
                    "Redis connection timed out after {:?}",
                    connect_timeout
                ))),
            };

            match outcome {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Read one field of a hash
    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, InfrastructureError> {
        let (key, field) = (key.to_string(), field.to_string());
        self.execute_with_retry(move |mut conn| {
            let (key, field) = (key.clone(), field.clone());
            Box::pin(async move { conn.hget::<_, _, Option<String>>(key, field).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Write one field of a hash and refresh the hash TTL in the same transaction
    pub async fn hash_set(
        &self,
        key: &str,
        field: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let (key, field, value) = (key.to_string(), field.to_string(), value.to_string());
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        self.execute_with_retry(move |mut conn| {
            let (key, field, value) = (key.clone(), field.clone(), value.clone());
            Box::pin(async move {
                redis::pipe()
                    .atomic()
                    .hset(&key, field, value)
                    .ignore()
                    .expire(&key, ttl)
                    .ignore()
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Remove one field of a hash. Returns whether the field existed.
    pub async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, InfrastructureError> {
        let (key, field) = (key.to_string(), field.to_string());
        let removed = self
            .execute_with_retry(move |mut conn| {
                let (key, field) = (key.clone(), field.clone());
                Box::pin(async move { conn.hdel::<_, _, i64>(key, field).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(removed > 0)
    }

    /// Remove a whole key
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        let removed = self
            .execute_with_retry(move |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del::<_, i64>(key).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(removed > 0)
    }

    /// Check if the connection answers PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;

        if response != "PONG" {
            warn!("Redis health check returned unexpected response: {}", response);
            return Ok(false);
        }
        Ok(true)
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Whether a Redis error is transient
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
