//! Session-scoped attempt throttling: request counting, lockout, block escalation

mod session;
mod throttle;


pub use session::VerificationSession;
pub use throttle::{AttemptThrottle, ThrottleConfig, ThrottleDecision};
