//! Mock email service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use og_shared::identifier::{is_valid_email, mask_email};

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

#[derive(Clone, Default)]
pub struct MockEmailService {
    messages: Arc<RwLock<Vec<EmailMessage>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<EmailMessage> {
        self.messages.read().await.clone()
    }

    /// Most recent message sent to `email`
    pub async fn last_message_to(&self, email: &str) -> Option<EmailMessage> {
        self.messages
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.to == email)
            .cloned()
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if !is_valid_email(&message.to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                mask_email(&message.to)
            )));
        }
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Email("Simulated email sending failure".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        self.messages.write().await.push(message.clone());

        tracing::info!(
            provider = "mock",
            to = %mask_email(&message.to),
            message_id = %message_id,
            "Email sent successfully (mock)"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
