//! Tests for InMemoryUserRepository

use og_core::domain::entities::User;
use og_core::errors::{AuthError, DomainError};
use og_core::repositories::UserRepository;
use og_shared::AuthMethod;

use crate::memory::InMemoryUserRepository;

#[tokio::test]
async fn test_lookup_by_any_identifier() {
    let repo = InMemoryUserRepository::new();
    let user = User::new()
        .with_email("jane@example.com")
        .with_phone_number("+14155552671");
    repo.create(user.clone()).await.unwrap();

    let by_email = repo.get_by_identifier("jane@example.com").await.unwrap();
    let by_phone = repo.get_by_identifier("+14155552671").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));
    assert_eq!(by_phone.map(|u| u.id), Some(user.id));
    assert!(repo.get_by_identifier("other@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_normalizes_submitted_identifier() {
    let repo = InMemoryUserRepository::new();
    let user = User::new()
        .with_email("jane@example.com")
        .with_phone_number("+14155552671")
        .with_username("janedoe");
    repo.create(user.clone()).await.unwrap();

    for identifier in ["Jane@Example.com", "+1 415-555-2671", " janedoe "] {
        let found = repo.get_by_identifier(identifier).await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id), "{identifier}");
    }
    assert!(repo.get_by_identifier("JANEDOE").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_rejects_taken_field() {
    let repo = InMemoryUserRepository::new();
    repo.create(User::new().with_username("jane")).await.unwrap();

    let err = repo
        .create(User::new().with_email("jane@example.com").with_username("jane"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::Auth(AuthError::UserAlreadyExists {
            field: "username".to_string()
        })
    );
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_save_unknown_user_is_not_found() {
    let repo = InMemoryUserRepository::new();
    let err = repo.save(User::new().with_email("x@example.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_save_persists_flags() {
    let repo = InMemoryUserRepository::new();
    let mut user = repo
        .create(User::new().with_email("jane@example.com"))
        .await
        .unwrap();

    user.block();
    repo.save(user.clone()).await.unwrap();

    let stored = repo
        .find_by_field(AuthMethod::EmailPassword, "jane@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_block);
    assert!(!stored.is_active);
    assert!(repo.exists_by_field(AuthMethod::EmailPassword, "jane@example.com").await.unwrap());
}
