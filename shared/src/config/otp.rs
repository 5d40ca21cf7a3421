//! OTP verification, lockout and blocking configuration

use serde::{Deserialize, Serialize};

use super::{env_flag, env_number};

/// OTP verification configuration
///
/// Thresholds are expressed purely as data: no operation times out, a code
/// simply stops being valid once its window has elapsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// `OTP_LOCKOUT_DURATION` - minutes a session stays locked out
    #[serde(default = "default_lockout_duration")]
    pub lockout_duration_minutes: i64,

    /// `OTP_MAX_REQUEST_TIMEOUT` - verification requests before lockout
    #[serde(default = "default_max_request_timeout")]
    pub max_request_timeout: u32,

    /// `OTP_BLOCK_COUNT` - lockout escalations before the account is blocked
    #[serde(default = "default_block_count")]
    pub block_count: u32,

    /// `OTP_MAX_FAILED_ATTEMPTS` - mismatches before a new code is forced
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,

    /// `OTP_EXPIRE_SECONDS` - lifetime of an issued code
    #[serde(default = "default_expire_seconds")]
    pub expire_seconds: i64,

    /// `SEND_OTP` - OTP flow when true, link activation otherwise
    #[serde(default = "default_send_otp")]
    pub send_otp: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            lockout_duration_minutes: default_lockout_duration(),
            max_request_timeout: default_max_request_timeout(),
            block_count: default_block_count(),
            max_failed_attempts: default_max_failed_attempts(),
            expire_seconds: default_expire_seconds(),
            send_otp: default_send_otp(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            lockout_duration_minutes: env_number("OTP_LOCKOUT_DURATION", default_lockout_duration()),
            max_request_timeout: env_number("OTP_MAX_REQUEST_TIMEOUT", default_max_request_timeout()),
            block_count: env_number("OTP_BLOCK_COUNT", default_block_count()),
            max_failed_attempts: env_number("OTP_MAX_FAILED_ATTEMPTS", default_max_failed_attempts()),
            expire_seconds: env_number("OTP_EXPIRE_SECONDS", default_expire_seconds()),
            send_otp: env_flag("SEND_OTP", default_send_otp()),
        }
    }

    /// Set the lockout duration in minutes
    pub fn with_lockout_minutes(mut self, minutes: i64) -> Self {
        self.lockout_duration_minutes = minutes;
        self
    }

    /// Set the number of lockout escalations before blocking
    pub fn with_block_count(mut self, count: u32) -> Self {
        self.block_count = count;
        self
    }

    /// Set the request threshold that triggers a lockout
    pub fn with_max_request_timeout(mut self, count: u32) -> Self {
        self.max_request_timeout = count;
        self
    }

    /// Set the number of mismatches before a new code is forced
    pub fn with_max_failed_attempts(mut self, count: u32) -> Self {
        self.max_failed_attempts = count;
        self
    }
}

fn default_lockout_duration() -> i64 {
    1
}

fn default_max_request_timeout() -> u32 {
    4
}

fn default_block_count() -> u32 {
    1
}

fn default_max_failed_attempts() -> u32 {
    4
}

fn default_expire_seconds() -> i64 {
    300 // 5 minutes
}

fn default_send_otp() -> bool {
    true
}
