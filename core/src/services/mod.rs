//! Business services containing the verification engine.

pub mod otp;
pub mod registration;
pub mod strategy;
pub mod throttle;
pub mod verification;

// Re-export commonly used types
pub use otp::{OtpLedger, OtpOutcome, OtpPolicy};
pub use registration::{ReactivationOutcome, RegistrationConfig, RegistrationOutcome, RegistrationService};
pub use strategy::{CombinedStrategy, IdentityStrategy, StrategyResolver, UserData};
pub use throttle::{AttemptThrottle, ThrottleConfig, ThrottleDecision, VerificationSession};
pub use verification::{
    DeliveryChannel, EventSink, NotificationSink, VerificationConfig, VerificationController,
    VerifyOutcome,
};
