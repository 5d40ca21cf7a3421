//! Code delivery over the configured SMS and email providers.

use async_trait::async_trait;
use std::sync::Arc;

use og_core::errors::{DomainResult, OtpError};
use og_core::services::verification::NotificationSink;
use og_shared::identifier::mask_email;
use og_shared::phone::mask_phone_number;

use crate::email::EmailService;
use crate::sms::SmsService;

/// `NotificationSink` backed by one SMS and one email provider
///
/// Provider failures surface as `OtpError::DeliveryFailed` naming the channel.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sms: Arc<dyn SmsService>,
    email: Arc<dyn EmailService>,
}

impl NotificationDispatcher {
    pub fn new(sms: Arc<dyn SmsService>, email: Arc<dyn EmailService>) -> Self {
        Self { sms, email }
    }
}

#[async_trait]
impl NotificationSink for NotificationDispatcher {
    async fn send_email_code(&self, token: &str, email: &str) -> DomainResult<()> {
        self.email
            .send_verification_code(email, token)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(
                    to = %mask_email(email),
                    provider = self.email.provider_name(),
                    error = %e,
                    "Email code delivery failed"
                );
                OtpError::DeliveryFailed {
                    channel: "email".to_string(),
                }
                .into()
            })
    }

    async fn send_sms_code(&self, token: &str, phone_number: &str) -> DomainResult<()> {
        self.sms
            .send_verification_code(phone_number, token)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(
                    to = %mask_phone_number(phone_number),
                    provider = self.sms.provider_name(),
                    error = %e,
                    "SMS code delivery failed"
                );
                OtpError::DeliveryFailed {
                    channel: "sms".to_string(),
                }
                .into()
            })
    }
}
