//! SMS Service Module
//!
//! SMS providers used to deliver verification codes:
//!
//! - **SmsService**: common interface for all providers
//! - **MockSmsService**: records messages in memory for development and tests
//! - **TwilioSmsService**: production delivery via the Twilio API (`twilio-sms` feature)

use std::sync::Arc;

pub mod mock_sms;
pub mod sms_service;

#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use mock_sms::{MockSmsService, SentSms};
pub use sms_service::SmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Create the SMS service named by `config.provider`
///
/// Unknown providers, and providers whose feature is not compiled in, fall
/// back to the mock service with a warning.
pub fn create_sms_service(config: &crate::config::SmsConfig) -> Arc<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        #[cfg(feature = "twilio-sms")]
        "twilio" => {
            let twilio_config = TwilioConfig {
                account_sid: config.api_key.clone(),
                auth_token: config.api_secret.clone(),
                from_number: config.from_number.clone(),
                max_retries: 3,
                retry_delay_ms: 1000,
            };
            Arc::new(TwilioSmsService::new(twilio_config))
        }
        other => {
            tracing::warn!(
                provider = other,
                "Unknown or disabled SMS provider, using mock implementation"
            );
            Arc::new(MockSmsService::new())
        }
    }
}
