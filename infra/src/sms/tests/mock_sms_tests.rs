//! Unit tests for mock SMS service

use crate::sms::{MockSmsService, SmsService};
use crate::InfrastructureError;

#[tokio::test]
async fn test_mock_sms_send_success() {
    let service = MockSmsService::new();
    let message_id = service.send_sms("+14155552671", "Test message").await.unwrap();

    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.message_count().await, 1);
}

#[tokio::test]
async fn test_mock_sms_invalid_phone() {
    let service = MockSmsService::new();
    let result = service.send_sms("not-a-number", "Test message").await;

    match result {
        Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("Invalid phone number")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
    assert_eq!(service.message_count().await, 0);
}

#[tokio::test]
async fn test_mock_sms_simulate_failure() {
    let service = MockSmsService::new();
    service.set_simulate_failure(true);

    assert!(service.send_sms("+14155552671", "Test message").await.is_err());
    assert!(!service.is_available().await);
}

#[tokio::test]
async fn test_verification_code_message() {
    let service = MockSmsService::new();
    service.send_verification_code("+14155552671", "042917").await.unwrap();
    service.send_verification_code("+442071838750", "111111").await.unwrap();

    let last = service.last_message_to("+14155552671").await.unwrap();
    assert!(last.message.contains("042917"));

    service.reset().await;
    assert!(service.messages().await.is_empty());
}

#[test]
fn test_provider_name() {
    assert_eq!(MockSmsService::new().provider_name(), "Mock");
}
