//! Typed error enums for identity resolution, OTP handling and validation
//!
//! Messages here are for logs and developers. Caller-facing wording for
//! verification outcomes lives on `VerifyOutcome::message`.

use thiserror::Error;

/// Identity and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No authentication method matches the supplied data")]
    NoAuthMethod,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists: {field}")]
    UserAlreadyExists { field: String },

    #[error("User account is blocked")]
    UserBlocked,

    #[error("User account is not active")]
    UserInactive,
}

impl AuthError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NoAuthMethod => "NO_AUTH_METHOD",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserAlreadyExists { .. } => "USER_ALREADY_EXISTS",
            AuthError::UserBlocked => "USER_BLOCKED",
            AuthError::UserInactive => "USER_INACTIVE",
        }
    }
}

/// OTP record errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("No OTP record for this user and reason")]
    RecordNotFound,

    #[error("OTP record was modified concurrently")]
    StaleRecord,

    #[error("Failed to deliver code via {channel}")]
    DeliveryFailed { channel: String },

    #[error("User has no email address or phone number to send a code to")]
    NoDeliveryAddress,
}

impl OtpError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::RecordNotFound => "OTP_NOT_FOUND",
            OtpError::StaleRecord => "OTP_STALE_RECORD",
            OtpError::DeliveryFailed { .. } => "OTP_DELIVERY_FAILED",
            OtpError::NoDeliveryAddress => "OTP_NO_DELIVERY_ADDRESS",
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Invalid username format")]
    InvalidUsername,
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidPhone => "INVALID_PHONE",
            ValidationError::InvalidUsername => "INVALID_USERNAME",
        }
    }
}
