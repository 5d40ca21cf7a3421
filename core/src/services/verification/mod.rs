//! OTP verification controller
//!
//! This module orchestrates a single verification attempt:
//! - Session throttling (request counting, lockout, block escalation)
//! - OTP evaluation through the ledger
//! - Resend on expiry or exhausted attempts
//! - Account activation, blocking and domain events

mod config;
mod delivery;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationConfig;
pub use delivery::{send_code, DeliveryChannel};
pub use service::VerificationController;
pub use traits::{EventSink, NotificationSink};
pub use types::VerifyOutcome;
