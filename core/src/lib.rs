//! # OtpGate Core
//!
//! Core domain layer of the OtpGate verification engine: entities, typed
//! errors, repository and sink contracts, and the services that resolve
//! identity strategies, manage OTP records, throttle sessions and run
//! verification attempts.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
