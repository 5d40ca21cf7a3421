//! Expiry and attempt limits applied by the ledger

use chrono::Duration;

use og_shared::OtpConfig;

/// Limits for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    /// How long an issued code stays valid
    pub expiry_window: Duration,
    /// Mismatches tolerated before a new code is required
    pub max_failed_attempts: u32,
}

impl OtpPolicy {
    pub fn new(expiry_window: Duration, max_failed_attempts: u32) -> Self {
        Self {
            expiry_window,
            max_failed_attempts,
        }
    }

    pub fn from_config(config: &OtpConfig) -> Self {
        Self::new(
            Duration::seconds(config.expire_seconds),
            config.max_failed_attempts,
        )
    }
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self::from_config(&OtpConfig::default())
    }
}
