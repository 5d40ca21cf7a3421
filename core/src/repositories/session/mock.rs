//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::SessionStore;

/// One caller's session held in memory
#[derive(Clone, Default)]
pub struct MockSessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    pub should_fail: Arc<AtomicBool>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_values(pairs: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut values = store.values.write().await;
            for (k, v) in pairs {
                values.insert(k.to_string(), v.to_string());
            }
        }
        store
    }

    pub async fn value(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn check_fail(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("session store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_fail()?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.check_fail()?;
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.check_fail()?;
        self.values.write().await.remove(key);
        Ok(())
    }
}
