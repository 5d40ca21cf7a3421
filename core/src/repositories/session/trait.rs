//! Session store contract.
//!
//! A `SessionStore` instance is bound to one caller's session. Values are
//! strings; typed access goes through `VerificationSession`.

use async_trait::async_trait;

use crate::errors::DomainError;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError>;

    /// Removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
