//! Fan-out of OTP events to in-process subscribers
//!
//! Subscribers that fall behind by more than the channel capacity lose the
//! oldest events; `emit` never blocks.

use async_trait::async_trait;
use tokio::sync::broadcast;

use og_core::domain::events::OtpEvent;
use og_core::services::verification::EventSink;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<OtpEvent>,
}

impl BroadcastEventSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OtpEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for BroadcastEventSink {
    async fn emit(&self, event: OtpEvent) {
        // No subscribers is not an error
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            tracing::trace!(event = event.kind.as_str(), "OTP event dropped, no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_core::domain::entities::OtpReason;
    use og_core::domain::events::OtpEventKind;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_subscribers_receive_events_in_order() {
        let sink = BroadcastEventSink::new();
        let mut rx = sink.subscribe();
        let user_id = Uuid::new_v4();

        sink.emit(OtpEvent::failed(Some(user_id), OtpReason::EmailActivation, 1)).await;
        sink.emit(OtpEvent::verified(user_id, OtpReason::EmailActivation)).await;

        assert_eq!(rx.recv().await.unwrap().kind, OtpEventKind::Failed);
        assert_eq!(rx.recv().await.unwrap().kind, OtpEventKind::Verified);
    }

    #[tokio::test]
    async fn test_emit_without_subscribers() {
        let sink = BroadcastEventSink::with_capacity(0);
        assert_eq!(sink.subscriber_count(), 0);
        sink.emit(OtpEvent::expired(Uuid::new_v4(), OtpReason::PhoneActivation)).await;
    }
}
