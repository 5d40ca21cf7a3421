//! Domain events emitted once per verification outcome.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::OtpReason;

/// Kind of OTP event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpEventKind {
    /// `otp_expired`
    Expired,
    /// `otp_failed`
    Failed,
    /// `otp_verified`
    Verified,
}

impl OtpEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpEventKind::Expired => "otp_expired",
            OtpEventKind::Failed => "otp_failed",
            OtpEventKind::Verified => "otp_verified",
        }
    }
}

impl std::fmt::Display for OtpEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An OTP domain event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEvent {
    pub kind: OtpEventKind,

    /// `None` when the failure happened before a user was resolved
    pub user_id: Option<Uuid>,

    pub reason: OtpReason,

    /// Failed attempts recorded on the OTP, where meaningful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
}

impl OtpEvent {
    pub fn expired(user_id: Uuid, reason: OtpReason) -> Self {
        Self {
            kind: OtpEventKind::Expired,
            user_id: Some(user_id),
            reason,
            attempts: None,
        }
    }

    pub fn failed(user_id: Option<Uuid>, reason: OtpReason, attempts: u32) -> Self {
        Self {
            kind: OtpEventKind::Failed,
            user_id,
            reason,
            attempts: Some(attempts),
        }
    }

    pub fn verified(user_id: Uuid, reason: OtpReason) -> Self {
        Self {
            kind: OtpEventKind::Verified,
            user_id: Some(user_id),
            reason,
            attempts: None,
        }
    }
}
