//! In-memory adapters
//!
//! Process-local implementations of the core repository and session traits.
//! They honour the same contracts as the MySQL and Redis adapters, including
//! compare-and-swap on OTP record versions, and back the integration tests.

pub mod otp_repository;
pub mod session_store;
pub mod user_repository;

#[cfg(test)]
mod tests;

pub use otp_repository::InMemoryOtpRepository;
pub use session_store::InMemorySessionStore;
pub use user_repository::InMemoryUserRepository;
