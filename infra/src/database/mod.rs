//! Database module - MySQL implementations using SQLx
//!
//! Queries are checked at runtime; the schema lives in
//! `infra/migrations/20260101000000_otpgate_schema.sql`.

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlOtpRepository, MySqlUserRepository};
