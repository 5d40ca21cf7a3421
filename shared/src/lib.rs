//! Shared utilities and common types for the OtpGate engine
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types loaded from the environment
//! - Identifier utilities (phone normalisation, email/username checks, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthMethod, AuthMethodsConfig, CacheConfig, DatabaseConfig, Environment,
    LoggingConfig, OtpConfig,
};
pub use utils::{identifier, phone};
