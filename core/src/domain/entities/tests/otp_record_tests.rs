//! Unit tests for OTP record entity

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpReason, OtpRecord, OtpState, TOKEN_LENGTH};

#[test]
fn test_new_record_is_active() {
    let now = Utc::now();
    let record = OtpRecord::new(Uuid::new_v4(), OtpReason::EmailActivation, now);

    assert_eq!(record.state, OtpState::Active);
    assert_eq!(record.failed_attempts_count, 0);
    assert_eq!(record.last_sent_at, now);
    assert_eq!(record.version, 0);
    assert_eq!(record.token.len(), TOKEN_LENGTH);
    assert!(record.token.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let now = Utc::now();
    let window = Duration::seconds(300);
    let record = OtpRecord::new(Uuid::new_v4(), OtpReason::EmailActivation, now);

    assert!(!record.is_expired_at(now + Duration::seconds(299), window));
    assert!(record.is_expired_at(now + window, window));
    assert!(record.is_expired_at(now + Duration::seconds(301), window));
}

#[test]
fn test_matches_trims_input() {
    let mut record = OtpRecord::new(Uuid::new_v4(), OtpReason::ForgetPassword, Utc::now());
    record.token = "012345".to_string();

    assert!(record.matches("012345"));
    assert!(record.matches(" 012345\n"));
    assert!(!record.matches("12345"));
    assert!(!record.matches("012346"));
}

#[test]
fn test_debug_redacts_token() {
    let mut record = OtpRecord::new(Uuid::new_v4(), OtpReason::EmailActivation, Utc::now());
    record.token = "987654".to_string();

    let rendered = format!("{:?}", record);
    assert!(!rendered.contains("987654"));
    assert!(rendered.contains("[REDACTED]"));
}

#[test]
fn test_reason_round_trips_through_str() {
    for reason in [
        OtpReason::EmailActivation,
        OtpReason::PhoneActivation,
        OtpReason::ForgetPassword,
        OtpReason::TwoFactorAuth,
    ] {
        assert_eq!(reason.as_str().parse::<OtpReason>().unwrap(), reason);
    }
    assert!(OtpReason::ForgetPassword.is_password_recovery());
    assert!(!OtpReason::EmailActivation.is_password_recovery());
    assert!("bogus".parse::<OtpReason>().is_err());
}
