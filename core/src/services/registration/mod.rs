//! Signup, reactivation and password-channel authentication

mod service;
mod types;


pub use service::{RegistrationConfig, RegistrationService};
pub use types::{ReactivationOutcome, RegistrationOutcome};
