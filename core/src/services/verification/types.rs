//! Outcome of a verification request

use serde::Serialize;
use uuid::Uuid;

/// What the caller is told after a verification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Account was already blocked
    Blocked,
    /// Account was blocked by this request
    BlockedNow,
    /// Signup flow without a pending signup in the session
    Unauthorized,
    /// Session is locked out
    LockedOut { minutes: i64, seconds: i64 },
    /// Lockout has elapsed and counters were reset
    LockoutElapsed,
    /// Code accepted
    Verified {
        user_id: Uuid,
        redirect_to: String,
        logged_in: bool,
    },
    /// Code expired; a new one was sent
    Expired,
    /// Attempt limit reached; a new code was sent
    TooManyAttempts,
    /// Code did not match
    IncorrectCode { attempts: u32 },
    /// Identifier does not resolve to a user
    InvalidIdentifier,
    /// No active code exists for this user
    RestartRequired,
    /// Unexpected failure
    Failed,
}

impl VerifyOutcome {
    /// Message shown to the caller
    pub fn message(&self) -> String {
        match self {
            VerifyOutcome::Blocked => {
                "Your account has been blocked. Please contact support.".to_string()
            }
            VerifyOutcome::BlockedNow => {
                "Your account has been blocked due to too many failed attempts.".to_string()
            }
            VerifyOutcome::Unauthorized => {
                "You are not authorized to access this page.".to_string()
            }
            VerifyOutcome::LockedOut { minutes, seconds } => format!(
                "Too many attempts. Please try again in {} minutes and {} seconds.",
                minutes, seconds
            ),
            VerifyOutcome::LockoutElapsed => "You can now try again.".to_string(),
            VerifyOutcome::Verified { .. } => "Your account has been verified.".to_string(),
            VerifyOutcome::Expired => {
                "The code has expired. A new code has been sent.".to_string()
            }
            VerifyOutcome::TooManyAttempts => {
                "Too many failed attempts. A new code has been sent.".to_string()
            }
            VerifyOutcome::IncorrectCode { .. } => {
                "The code you entered is incorrect.".to_string()
            }
            VerifyOutcome::InvalidIdentifier => {
                "Invalid user identifier. Please restart the process.".to_string()
            }
            VerifyOutcome::RestartRequired => {
                "No active code was found. Please restart the process.".to_string()
            }
            VerifyOutcome::Failed => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            VerifyOutcome::Blocked => "USER_BLOCKED",
            VerifyOutcome::BlockedNow => "USER_BLOCKED_NOW",
            VerifyOutcome::Unauthorized => "UNAUTHORIZED",
            VerifyOutcome::LockedOut { .. } => "LOCKED_OUT",
            VerifyOutcome::LockoutElapsed => "LOCKOUT_ELAPSED",
            VerifyOutcome::Verified { .. } => "VERIFIED",
            VerifyOutcome::Expired => "OTP_EXPIRED",
            VerifyOutcome::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            VerifyOutcome::IncorrectCode { .. } => "INCORRECT_CODE",
            VerifyOutcome::InvalidIdentifier => "INVALID_IDENTIFIER",
            VerifyOutcome::RestartRequired => "RESTART_REQUIRED",
            VerifyOutcome::Failed => "INTERNAL_ERROR",
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified { .. })
    }
}
