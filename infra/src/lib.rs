//! # Infrastructure Layer
//!
//! Concrete adapters for the OtpGate engine. The core crate only knows the
//! repository, session and sink traits; this crate provides:
//! - **Memory**: in-process repositories and session store
//! - **Database**: MySQL repositories using SQLx
//! - **Cache**: Redis-backed session store
//! - **SMS / Email**: code delivery providers and the `NotificationDispatcher`
//! - **Events**: tracing and broadcast event sinks
//! - **Logging**: `tracing-subscriber` bootstrap
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis session storage (default)
//! - `twilio-sms`: Enable the Twilio SMS provider

use og_core::errors::DomainError;

pub use og_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and session store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// In-memory adapters for tests and single-process deployments
pub mod memory;

/// SMS service module - External SMS providers
pub mod sms;

/// Email delivery providers
pub mod email;

/// `NotificationSink` implementation over SMS and email providers
pub mod notification;

/// Event sinks
pub mod events;

/// Logging bootstrap
pub mod logging;

pub use notification::NotificationDispatcher;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration for infrastructure services
    //!
    //! Engine settings come from `og_shared::AppConfig`; provider credentials
    //! are local to this crate.

    use og_shared::AppConfig;
    use serde::{Deserialize, Serialize};

    pub use og_shared::config::{CacheConfig, DatabaseConfig, LoggingConfig};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Engine configuration (auth methods, OTP, database, cache, logging)
        pub app: AppConfig,
        /// SMS service configuration
        pub sms: SmsConfig,
        /// Email service configuration
        pub email: EmailConfig,
    }

    /// SMS service configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// SMS service provider ("twilio", "mock")
        pub provider: String,
        /// API credentials
        pub api_key: String,
        /// API secret/token
        pub api_secret: String,
        /// From phone number
        pub from_number: String,
    }

    /// Email service configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct EmailConfig {
        /// Email provider ("http", "mock")
        pub provider: String,
        /// Delivery webhook receiving `{to, subject, body}` JSON
        pub endpoint: String,
        /// Bearer token for the webhook
        pub api_key: String,
        /// Sender address
        pub from_address: String,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                api_key: String::new(),
                api_secret: String::new(),
                from_number: "+15005550006".to_string(),
            }
        }
    }

    impl Default for EmailConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                endpoint: String::new(),
                api_key: String::new(),
                from_address: "no-reply@otpgate.local".to_string(),
            }
        }
    }

    impl Default for InfrastructureConfig {
        fn default() -> Self {
            Self {
                app: AppConfig::default(),
                sms: SmsConfig::default(),
                email: EmailConfig::default(),
            }
        }
    }

    impl SmsConfig {
        pub fn from_env() -> Self {
            let defaults = Self::default();
            Self {
                provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
                api_key: std::env::var("SMS_API_KEY").unwrap_or_default(),
                api_secret: std::env::var("SMS_API_SECRET").unwrap_or_default(),
                from_number: std::env::var("SMS_FROM_NUMBER").unwrap_or(defaults.from_number),
            }
        }
    }

    impl EmailConfig {
        pub fn from_env() -> Self {
            let defaults = Self::default();
            Self {
                provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
                endpoint: std::env::var("EMAIL_ENDPOINT").unwrap_or_default(),
                api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
                from_address: std::env::var("EMAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            }
        }
    }
}

/// Load infrastructure configuration from environment
///
/// A `.env` file in the working directory is applied first when present;
/// variables already set in the process win.
pub fn load_config() -> Result<config::InfrastructureConfig, InfrastructureError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(InfrastructureError::Config(format!("Failed to read .env: {}", e)));
        }
    }

    let app = og_shared::AppConfig::from_env();
    if app.auth_methods.enabled_methods().is_empty() {
        tracing::warn!(event = "config_no_auth_method", "No authentication method is enabled");
    }

    Ok(config::InfrastructureConfig {
        app,
        sms: config::SmsConfig::from_env(),
        email: config::EmailConfig::from_env(),
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_maps_to_internal() {
        let err: DomainError = InfrastructureError::Sms("gateway down".to_string()).into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(err.to_string().contains("gateway down"));
    }

    #[test]
    fn test_provider_config_from_env() {
        temp_env::with_vars(
            [
                ("SMS_PROVIDER", Some("twilio")),
                ("SMS_FROM_NUMBER", Some("+14155550100")),
                ("EMAIL_PROVIDER", None::<&str>),
            ],
            || {
                let sms = config::SmsConfig::from_env();
                assert_eq!(sms.provider, "twilio");
                assert_eq!(sms.from_number, "+14155550100");

                let email = config::EmailConfig::from_env();
                assert_eq!(email.provider, "mock");
            },
        );
    }
}
