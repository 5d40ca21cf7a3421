//! Webhook email provider
//!
//! POSTs `{from, to, subject, body}` as JSON to `EmailConfig::endpoint` with a
//! bearer token. The webhook answers `{"id": "..."}` on success.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use og_shared::identifier::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::config::EmailConfig;
use crate::InfrastructureError;

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct DeliveryReceipt {
    id: String,
}

pub struct HttpEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl HttpEmailService {
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.endpoint.is_empty() {
            return Err(InfrastructureError::Config("EMAIL_ENDPOINT not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let payload = OutboundEmail {
            from: &self.config.from_address,
            to: &message.to,
            subject: &message.subject,
            body: &message.body,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                to = %mask_email(&message.to),
                status = status.as_u16(),
                "Email webhook rejected message"
            );
            return Err(InfrastructureError::Email(format!(
                "Email webhook returned {}",
                status
            )));
        }

        let receipt: DeliveryReceipt = response.json().await?;
        tracing::info!(to = %mask_email(&message.to), message_id = %receipt.id, "Email sent");
        Ok(receipt.id)
    }

    fn provider_name(&self) -> &str {
        "Http"
    }
}
