//! Twilio SMS Service Implementation
//!
//! Retries transient failures with exponential backoff. Client errors
//! (invalid number, rejected request) are not retried.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use og_shared::phone::{mask_phone_number, normalize_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Twilio's per-message body limit
const MAX_MESSAGE_LENGTH: usize = 1600;

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number, E.164
    pub from_number: String,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            max_retries: std::env::var("TWILIO_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("TWILIO_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        })
    }
}

pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);
        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );
        Self { client, config }
    }

    pub fn from_env() -> Result<Self, InfrastructureError> {
        Ok(Self::new(TwilioConfig::from_env()?))
    }

    /// Twilio only accepts E.164 recipients
    fn to_e164(phone: &str) -> Result<String, InfrastructureError> {
        let normalized = normalize_phone_number(phone);
        if normalized.starts_with('+') && normalized.len() > 7 {
            Ok(normalized)
        } else {
            Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +14155552671)".to_string(),
            ))
        }
    }

    fn is_client_error(message: &str) -> bool {
        message.contains("400") || message.contains("invalid")
    }

    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, message);
            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(phone = %mask_phone_number(to), sid = %response.sid, "SMS sent via Twilio");
                    return Ok(response.sid);
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, error_msg
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            attempts, error_msg
                        )));
                    }
                    if Self::is_client_error(&error_msg) {
                        return Err(InfrastructureError::Sms(format!("Invalid request: {}", error_msg)));
                    }

                    warn!("Retrying SMS after {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let to = Self::to_e164(phone_number)?;

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.send_with_retry(&to, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
