//! Mock SMS Service Implementation
//!
//! Keeps every message in memory instead of sending it, so development
//! setups and tests can read codes back.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use og_shared::phone::{is_valid_phone, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// A message accepted by the mock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub message_id: String,
    pub phone_number: String,
    pub message: String,
}

/// Mock SMS service for development and testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    messages: Arc<RwLock<Vec<SentSms>>>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, oldest first
    pub async fn messages(&self) -> Vec<SentSms> {
        self.messages.read().await.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Most recent message sent to `phone_number`
    pub async fn last_message_to(&self, phone_number: &str) -> Option<SentSms> {
        self.messages
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.phone_number == phone_number)
            .cloned()
    }

    pub async fn reset(&self) {
        self.messages.write().await.clear();
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if !is_valid_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked_phone, "Mock SMS service simulating failure");
            return Err(InfrastructureError::Sms("Simulated SMS sending failure".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        self.messages.write().await.push(SentSms {
            message_id: message_id.clone(),
            phone_number: phone_number.to_string(),
            message: message.to_string(),
        });

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
