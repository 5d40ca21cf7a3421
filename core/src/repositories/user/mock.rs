//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use og_shared::AuthMethod;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    pub should_fail: Arc<AtomicBool>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a mock repository seeded with users
    pub async fn with_users(users: Vec<User>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.users.write().await;
            for user in users {
                map.insert(user.id, user);
            }
        }
        repo
    }

    /// Snapshot of a stored user
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn check_fail(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("user store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.check_fail()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        self.check_fail()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.is_identified_by(identifier)).cloned())
    }

    async fn find_by_field(
        &self,
        method: AuthMethod,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        self.check_fail()?;
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.identity(method) == Some(value))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_fail()?;
        let mut users = self.users.write().await;

        for method in AuthMethod::ALL {
            if let Some(value) = user.identity(method) {
                if users.values().any(|u| u.identity(method) == Some(value)) {
                    return Err(AuthError::UserAlreadyExists {
                        field: method.field().to_string(),
                    }
                    .into());
                }
            }
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        self.check_fail()?;
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}
