//! Configuration for the verification controller

use og_shared::OtpConfig;

use crate::domain::entities::otp_record::OtpReason;
use crate::services::otp::OtpPolicy;
use crate::services::throttle::ThrottleConfig;

/// Configuration for the verification controller
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Reason used when the session does not carry one
    pub reason: OtpReason,
    /// Reactivation flows skip the signup-pending check
    pub reactivation: bool,
    /// Where the caller is sent after a successful verification
    pub redirect_to: String,
    /// OTP expiry and attempt limits
    pub policy: OtpPolicy,
    /// Lockout and block thresholds
    pub throttle: ThrottleConfig,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self::from_otp_config(&OtpConfig::default(), OtpReason::EmailActivation)
    }
}

impl VerificationConfig {
    pub fn from_otp_config(config: &OtpConfig, reason: OtpReason) -> Self {
        Self {
            reason,
            reactivation: false,
            redirect_to: String::from("/"),
            policy: OtpPolicy::from_config(config),
            throttle: ThrottleConfig::from_config(config),
        }
    }

    /// Configure for the reactivation flow
    pub fn for_reactivation(mut self) -> Self {
        self.reactivation = true;
        self
    }

    pub fn with_redirect(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = redirect_to.into();
        self
    }
}
