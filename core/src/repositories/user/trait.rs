//! User repository trait defining the interface for user data persistence.
//!
//! User records are owned by the host application. The engine looks users up
//! by whichever identity field is in play and writes back activation and
//! block flags.

use async_trait::async_trait;
use uuid::Uuid;

use og_shared::AuthMethod;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use og_core::repositories::UserRepository;
/// use og_core::domain::entities::user::User;
/// use og_core::errors::DomainError;
/// use og_shared::AuthMethod;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, _: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn find_by_field(&self, _: AuthMethod, _: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn save(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user whose email, phone number or username matches `identifier`
    /// in canonical form (see `User::canonical_identity`)
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user carries this identifier
    /// * `Err(DomainError)` - Storage failure
    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by the identity field owned by `method`
    async fn find_by_field(
        &self,
        method: AuthMethod,
        value: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// Fails with `AuthError::UserAlreadyExists` when any identity field
    /// is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    ///
    /// Fails with `DomainError::NotFound` when the user does not exist.
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Check whether a user already owns `value` on the `method` channel
    async fn exists_by_field(&self, method: AuthMethod, value: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_field(method, value).await?.is_some())
    }
}
