//! Mock notification and event sinks for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::events::{OtpEvent, OtpEventKind};
use crate::errors::{DomainResult, OtpError};
use crate::services::verification::{EventSink, NotificationSink};

/// A delivered code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub channel: &'static str,
    pub token: String,
    pub destination: String,
}

/// Mock notification sink recording every delivery
#[derive(Clone, Default)]
pub struct MockNotificationSink {
    pub sent: Arc<Mutex<Vec<SentCode>>>,
    pub should_fail: Arc<AtomicBool>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentCode> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<SentCode> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn record(&self, channel: &'static str, token: &str, destination: &str) -> DomainResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(OtpError::DeliveryFailed {
                channel: channel.to_string(),
            }
            .into());
        }
        self.sent.lock().unwrap().push(SentCode {
            channel,
            token: token.to_string(),
            destination: destination.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for MockNotificationSink {
    async fn send_email_code(&self, token: &str, email: &str) -> DomainResult<()> {
        self.record("email", token, email)
    }

    async fn send_sms_code(&self, token: &str, phone_number: &str) -> DomainResult<()> {
        self.record("sms", token, phone_number)
    }
}

/// Mock event sink recording every event
#[derive(Clone, Default)]
pub struct MockEventSink {
    pub events: Arc<Mutex<Vec<OtpEvent>>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OtpEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<OtpEventKind> {
        self.events().into_iter().map(|e| e.kind).collect()
    }
}

#[async_trait]
impl EventSink for MockEventSink {
    async fn emit(&self, event: OtpEvent) {
        self.events.lock().unwrap().push(event);
    }
}
