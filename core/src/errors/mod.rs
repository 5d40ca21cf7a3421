//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, OtpError, ValidationError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(e) => e.error_code(),
            DomainError::Otp(e) => e.error_code(),
            DomainError::Validation(e) => e.error_code(),
        }
    }

    /// Shorthand for an internal failure with a message
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
