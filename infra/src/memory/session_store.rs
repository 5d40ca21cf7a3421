//! In-memory session store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use og_core::errors::DomainError;
use og_core::repositories::SessionStore;

/// One caller's session held in process memory
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every key currently set
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.values.read().await.clone()
    }

    pub async fn clear(&self) {
        self.values.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
