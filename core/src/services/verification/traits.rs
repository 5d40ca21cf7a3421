//! Traits for notification and event delivery

use async_trait::async_trait;

use crate::domain::events::OtpEvent;
use crate::errors::DomainResult;

/// Delivers codes to users
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Send a code to an email address
    async fn send_email_code(&self, token: &str, email: &str) -> DomainResult<()>;
    /// Send a code to a phone number
    async fn send_sms_code(&self, token: &str, phone_number: &str) -> DomainResult<()>;
}

/// Receives OTP domain events
///
/// Emission is fire-and-forget; implementations log their own failures.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: OtpEvent);
}
