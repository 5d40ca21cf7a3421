//! One-time password record owned by the OTP repository.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of digits in a generated token
pub const TOKEN_LENGTH: usize = 6;

/// Purpose an OTP was issued for. Scopes which record applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpReason {
    EmailActivation,
    PhoneActivation,
    ForgetPassword,
    TwoFactorAuth,
}

impl OtpReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpReason::EmailActivation => "email_activation",
            OtpReason::PhoneActivation => "phone_activation",
            OtpReason::ForgetPassword => "forget_password",
            OtpReason::TwoFactorAuth => "two_factor_auth",
        }
    }

    /// Password recovery never logs the user in
    pub fn is_password_recovery(&self) -> bool {
        matches!(self, OtpReason::ForgetPassword)
    }
}

impl std::fmt::Display for OtpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OtpReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_activation" => Ok(OtpReason::EmailActivation),
            "phone_activation" => Ok(OtpReason::PhoneActivation),
            "forget_password" => Ok(OtpReason::ForgetPassword),
            "two_factor_auth" => Ok(OtpReason::TwoFactorAuth),
            _ => Err(format!("Unknown OTP reason: {}", s)),
        }
    }
}

/// Lifecycle state. `Consumed` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpState {
    Active,
    Consumed,
    Expired,
}

impl OtpState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpState::Active => "active",
            OtpState::Consumed => "consumed",
            OtpState::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OtpState::Active)
    }
}

impl std::str::FromStr for OtpState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(OtpState::Active),
            "consumed" => Ok(OtpState::Consumed),
            "expired" => Ok(OtpState::Expired),
            _ => Err(format!("Unknown OTP state: {}", s)),
        }
    }
}

/// OTP record for a (user, reason) pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Purpose of the code
    pub reason: OtpReason,

    /// The secret code. Never logged.
    pub token: String,

    /// Lifecycle state
    pub state: OtpState,

    /// When the code was last issued
    pub last_sent_at: DateTime<Utc>,

    /// Mismatched submissions since the code was issued
    pub failed_attempts_count: u32,

    /// Optimistic-lock version, bumped by the repository on every save
    pub version: u64,
}

impl OtpRecord {
    /// Creates a fresh active record with a random token
    pub fn new(user_id: Uuid, reason: OtpReason, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            reason,
            token: Self::generate_token(),
            state: OtpState::Active,
            last_sent_at: now,
            failed_attempts_count: 0,
            version: 0,
        }
    }

    /// Generates a 6-digit token from the OS random source
    pub fn generate_token() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = TOKEN_LENGTH)
    }

    /// Moment the code stops being valid
    pub fn expires_at(&self, expiry_window: Duration) -> DateTime<Utc> {
        self.last_sent_at + expiry_window
    }

    /// Expiry is inclusive: at exactly `last_sent_at + window` the code is expired
    pub fn is_expired_at(&self, now: DateTime<Utc>, expiry_window: Duration) -> bool {
        now >= self.expires_at(expiry_window)
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, entered_code: &str) -> bool {
        constant_time_eq(self.token.as_bytes(), entered_code.trim().as_bytes())
    }

    pub fn is_active(&self) -> bool {
        self.state == OtpState::Active
    }

    pub fn mark_consumed(&mut self) {
        self.state = OtpState::Consumed;
    }

    pub fn mark_expired(&mut self) {
        self.state = OtpState::Expired;
    }

    pub fn record_failure(&mut self) {
        self.failed_attempts_count += 1;
    }
}

impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("reason", &self.reason)
            .field("token", &"[REDACTED]")
            .field("state", &self.state)
            .field("last_sent_at", &self.last_sent_at)
            .field("failed_attempts_count", &self.failed_attempts_count)
            .field("version", &self.version)
            .finish()
    }
}
