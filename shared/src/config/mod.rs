//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Enabled identity channels (email, phone, username)
//! - `otp` - OTP expiry, failed-attempt, lockout and block thresholds
//! - `cache` - Redis configuration for session state
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthMethod, AuthMethodsConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Enabled authentication methods
    pub auth_methods: AuthMethodsConfig,

    /// OTP verification and lockout configuration
    pub otp: OtpConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            auth_methods: AuthMethodsConfig::default(),
            otp: OtpConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            auth_methods: AuthMethodsConfig::from_env(),
            otp: OtpConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Parse a numeric environment variable, falling back to `default` when unset or invalid
pub(crate) fn env_number<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable (`true/false`, `1/0`, `yes/no`, `on/off`)
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_flag_parsing() {
        temp_env::with_vars(
            [("OG_TEST_FLAG_A", Some("yes")), ("OG_TEST_FLAG_B", Some("0"))],
            || {
                assert!(env_flag("OG_TEST_FLAG_A", false));
                assert!(!env_flag("OG_TEST_FLAG_B", true));
                assert!(env_flag("OG_TEST_FLAG_MISSING", true));
            },
        );
    }

    #[test]
    fn test_env_number_falls_back_on_garbage() {
        temp_env::with_var("OG_TEST_NUMBER", Some("not-a-number"), || {
            assert_eq!(env_number("OG_TEST_NUMBER", 7u32), 7);
        });
        temp_env::with_var("OG_TEST_NUMBER", Some(" 12 "), || {
            assert_eq!(env_number("OG_TEST_NUMBER", 7u32), 12);
        });
    }

    #[test]
    fn test_app_config_default_is_consistent() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.auth_methods.email_password);
        assert_eq!(config.otp.max_failed_attempts, 4);
    }
}
