//! In-memory user repository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use og_core::domain::entities::User;
use og_core::errors::{AuthError, DomainError};
use og_core::repositories::UserRepository;
use og_shared::AuthMethod;

/// User repository over a shared `HashMap`
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn taken_field(users: &HashMap<Uuid, User>, user: &User) -> Option<AuthMethod> {
        AuthMethod::ALL.into_iter().find(|method| {
            user.identity(*method).is_some_and(|value| {
                users
                    .values()
                    .any(|other| other.id != user.id && other.identity(*method) == Some(value))
            })
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.is_identified_by(identifier)).cloned())
    }

    async fn find_by_field(
        &self,
        method: AuthMethod,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.identity(method) == Some(value))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if let Some(method) = Self::taken_field(&users, &user) {
            return Err(AuthError::UserAlreadyExists {
                field: method.field().to_string(),
            }
            .into());
        }

        users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn save(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        if let Some(method) = Self::taken_field(&users, &user) {
            return Err(AuthError::UserAlreadyExists {
                field: method.field().to_string(),
            }
            .into());
        }

        user.updated_at = Utc::now();
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
