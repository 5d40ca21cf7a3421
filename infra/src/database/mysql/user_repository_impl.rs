//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use og_core::domain::entities::User;
use og_core::errors::{AuthError, DomainError};
use og_core::repositories::UserRepository;
use og_shared::AuthMethod;

use super::{column, db_error, is_unique_violation};

const USER_COLUMNS: &str =
    "id, email, phone_number, username, is_active, is_block, created_at, updated_at";

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Column owned by `method`. Always one of a fixed set, never user input.
    fn field_column(method: AuthMethod) -> &'static str {
        method.field()
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = column(row, "id")?;
        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            email: column(row, "email")?,
            phone_number: column(row, "phone_number")?,
            username: column(row, "username")?,
            is_active: column(row, "is_active")?,
            is_block: column(row, "is_block")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    /// First identity field of `user` already owned by a different account
    async fn taken_field(&self, user: &User) -> Result<Option<AuthMethod>, DomainError> {
        for method in AuthMethod::ALL {
            if let Some(value) = user.identity(method) {
                if let Some(existing) = self.find_by_field(method, value).await? {
                    if existing.id != user.id {
                        return Ok(Some(method));
                    }
                }
            }
        }
        Ok(None)
    }

    async fn conflict(&self, user: &User) -> DomainError {
        let field = match self.taken_field(user).await {
            Ok(Some(method)) => method.field(),
            _ => "identifier",
        };
        AuthError::UserAlreadyExists {
            field: field.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find_user_by_id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE email = ? OR phone_number = ? OR username = ? LIMIT 1",
            USER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(User::canonical_identity(AuthMethod::EmailPassword, identifier))
            .bind(User::canonical_identity(AuthMethod::PhonePassword, identifier))
            .bind(User::canonical_identity(AuthMethod::UsernamePassword, identifier))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("get_user_by_identifier", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_field(
        &self,
        method: AuthMethod,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ? LIMIT 1",
            USER_COLUMNS,
            Self::field_column(method)
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find_user_by_field", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if let Some(method) = self.taken_field(&user).await? {
            return Err(AuthError::UserAlreadyExists {
                field: method.field().to_string(),
            }
            .into());
        }

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, phone_number, username,
                is_active, is_block, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.username)
        .bind(user.is_active)
        .bind(user.is_block)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!(user_id = %user.id, "User created");
                Ok(user)
            }
            // Lost a race with a concurrent signup for the same identity
            Err(e) if is_unique_violation(&e) => Err(self.conflict(&user).await),
            Err(e) => Err(db_error("create_user", e)),
        }
    }

    async fn save(&self, mut user: User) -> Result<User, DomainError> {
        user.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, phone_number = ?, username = ?,
                is_active = ?, is_block = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.username)
        .bind(user.is_active)
        .bind(user.is_block)
        .bind(user.updated_at)
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
            Ok(_) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(self.conflict(&user).await),
            Err(e) => Err(db_error("save_user", e)),
        }
    }
}
