//! Records events as structured log lines

use async_trait::async_trait;

use og_core::domain::events::{OtpEvent, OtpEventKind};
use og_core::services::verification::EventSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: OtpEvent) {
        let user_id = event.user_id.map(|id| id.to_string()).unwrap_or_default();
        match event.kind {
            OtpEventKind::Failed => tracing::warn!(
                target: "otp_events",
                event = event.kind.as_str(),
                user_id = %user_id,
                reason = %event.reason,
                attempts = event.attempts.unwrap_or_default(),
                "OTP event"
            ),
            _ => tracing::info!(
                target: "otp_events",
                event = event.kind.as_str(),
                user_id = %user_id,
                reason = %event.reason,
                "OTP event"
            ),
        }
    }
}
