//! SMS Service Interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS using the standard message text
    async fn send_verification_code(&self, phone_number: &str, code: &str) -> Result<String, InfrastructureError> {
        self.send_sms(phone_number, &verification_message(code)).await
    }

    /// Provider name (e.g., "Twilio", "Mock")
    fn provider_name(&self) -> &str;

    async fn is_available(&self) -> bool {
        true
    }
}

/// Body of a verification code SMS
pub fn verification_message(code: &str) -> String {
    format!("Your verification code is: {}. Do not share it with anyone.", code)
}
