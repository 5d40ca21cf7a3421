//! Domain entities representing core business objects.

pub mod otp_record;
pub mod throttle_state;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use otp_record::{OtpReason, OtpRecord, OtpState, TOKEN_LENGTH};
pub use throttle_state::ThrottleState;
pub use user::User;
