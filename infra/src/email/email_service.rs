//! Email service interface

use async_trait::async_trait;
use serde::Serialize;

use crate::InfrastructureError;

/// An outgoing email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Standard verification code email
    pub fn verification_code(to: &str, code: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Your verification code".to_string(),
            body: format!(
                "Your verification code is: {}\n\nIf you did not request this code, you can ignore this email.",
                code
            ),
        }
    }
}

#[async_trait]
pub trait EmailService: Send + Sync {
    /// Deliver `message`, returning a provider message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, InfrastructureError> {
        self.send_email(&EmailMessage::verification_code(email, code)).await
    }

    fn provider_name(&self) -> &str;
}
