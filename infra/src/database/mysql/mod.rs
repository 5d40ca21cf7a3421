//! MySQL repository implementations

pub mod otp_repository_impl;
pub mod user_repository_impl;

pub use otp_repository_impl::MySqlOtpRepository;
pub use user_repository_impl::MySqlUserRepository;

use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};

use og_core::errors::DomainError;

/// Log a query failure and convert it for the domain boundary
pub(crate) fn db_error(operation: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(operation = operation, error = %e, "Database query failed");
    DomainError::Internal {
        message: format!("Database query failed ({}): {}", operation, e),
    }
}

/// Whether `e` is a duplicate-key violation
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// Read one column, reporting the column name on failure
pub(crate) fn column<T>(row: &MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: for<'r> sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get::<T, _>(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}
