//! Redis-backed session store

use async_trait::async_trait;

use og_core::errors::DomainError;
use og_core::repositories::SessionStore;
use og_shared::config::CacheConfig;

use super::redis_client::RedisClient;

/// Redis key holding the session hash for `session_id`
pub fn session_key(config: &CacheConfig, session_id: &str) -> String {
    config.make_key(&format!("session:{}", session_id))
}

/// A `SessionStore` bound to one session hash
///
/// Every write refreshes the hash TTL (`CacheConfig::session_ttl`), so an
/// abandoned session and its throttle counters disappear together.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    key: String,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, session_id: &str) -> Self {
        let key = session_key(client.config(), session_id);
        Self { client, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Drop the whole session
    pub async fn destroy(&self) -> Result<(), DomainError> {
        self.client.delete(&self.key).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.hash_get(&self.key, key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        let ttl = self.client.config().session_ttl;
        Ok(self.client.hash_set(&self.key, key, &value, ttl).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.client.hash_delete(&self.key, key).await?;
        Ok(())
    }
}
