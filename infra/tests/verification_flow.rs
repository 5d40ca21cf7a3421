//! End-to-end signup, verification and recovery flows over the in-memory
//! adapters and mock providers.

mod common;

use chrono::{Duration, Utc};

use og_core::domain::entities::OtpReason;
use og_core::domain::events::OtpEventKind;
use og_core::repositories::UserRepository;
use og_core::services::registration::{ReactivationOutcome, RegistrationOutcome};
use og_core::services::throttle::VerificationSession;
use og_core::services::verification::{DeliveryChannel, VerificationConfig, VerifyOutcome};
use og_infra::memory::InMemorySessionStore;
use og_shared::{AuthMethodsConfig, OtpConfig};

use common::{user_data, wrong_code, Stack};

#[tokio::test]
async fn test_email_signup_then_verify() {
    let stack = Stack::new();
    let otp = OtpConfig::default();
    let registration = stack.registration(AuthMethodsConfig::default(), &otp);
    let controller = stack.controller(VerificationConfig::from_otp_config(&otp, OtpReason::EmailActivation));
    let session = InMemorySessionStore::new();
    let mut events = stack.events.subscribe();

    let outcome = registration
        .register(&user_data(&[("email", "jane@example.com")]), &session, Utc::now())
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        RegistrationOutcome::CodeSent { channel: DeliveryChannel::Email, .. }
    ));

    let code = stack.last_email_code("jane@example.com").await;
    assert_eq!(code.len(), 6);

    let first = controller.verify_pending(&session, &wrong_code(&code)).await;
    assert_eq!(first, VerifyOutcome::IncorrectCode { attempts: 1 });

    let second = controller.verify_pending(&session, &code).await;
    match second {
        VerifyOutcome::Verified { user_id, logged_in, ref redirect_to } => {
            assert_eq!(user_id, outcome.user_id());
            assert!(logged_in);
            assert_eq!(redirect_to, "/");
        }
        other => panic!("expected Verified, got {:?}", other),
    }

    let user = stack.users.find_by_id(outcome.user_id()).await.unwrap().unwrap();
    assert!(user.is_active);

    let view = VerificationSession::new(&session);
    assert_eq!(view.authenticated_user().await.unwrap(), Some(user.id));
    assert!(!view.is_signup_pending().await.unwrap());

    assert_eq!(events.recv().await.unwrap().kind, OtpEventKind::Failed);
    assert_eq!(events.recv().await.unwrap().kind, OtpEventKind::Verified);

    // The consumed code cannot be replayed
    let replay = controller.verify(&session, "jane@example.com", &code).await;
    assert_eq!(replay, VerifyOutcome::Unauthorized);
}

#[tokio::test]
async fn test_phone_signup_delivers_by_sms() {
    let stack = Stack::new();
    let otp = OtpConfig::default();
    let phone_only = AuthMethodsConfig {
        email_password: false,
        phone_password: true,
        username_password: false,
    };
    let registration = stack.registration(phone_only, &otp);
    let controller = stack.controller(VerificationConfig::from_otp_config(&otp, OtpReason::PhoneActivation));
    let session = InMemorySessionStore::new();

    let outcome = registration
        .register(&user_data(&[("phone_number", "+1 (415) 555-2671")]), &session, Utc::now())
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        RegistrationOutcome::CodeSent { channel: DeliveryChannel::Sms, .. }
    ));
    assert!(stack.email.messages().await.is_empty());

    let code = stack.last_sms_code("+14155552671").await;
    let result = controller.verify(&session, "+14155552671", &code).await;
    assert!(result.is_verified());
}

#[tokio::test]
async fn test_expired_code_is_replaced() {
    let stack = Stack::new();
    let otp = OtpConfig::default();
    let registration = stack.registration(AuthMethodsConfig::default(), &otp);
    let controller = stack.controller(VerificationConfig::from_otp_config(&otp, OtpReason::EmailActivation));
    let session = InMemorySessionStore::new();
    let issued_at = Utc::now() - Duration::minutes(30);

    let outcome = registration
        .register(&user_data(&[("email", "late@example.com")]), &session, issued_at)
        .await
        .unwrap();
    let stale_code = stack.last_email_code("late@example.com").await;

    let now = Utc::now();
    let result = controller
        .verify_at(&session, "late@example.com", &stale_code, now)
        .await;
    assert_eq!(result, VerifyOutcome::Expired);
    assert_eq!(stack.email.messages().await.len(), 2);

    let history = stack.otps.history(outcome.user_id(), OtpReason::EmailActivation).await;
    assert_eq!(history.len(), 2);
    assert!(history[1].is_active());

    let fresh_code = stack.last_email_code("late@example.com").await;
    let result = controller
        .verify_at(&session, "late@example.com", &fresh_code, now)
        .await;
    assert!(result.is_verified());
}

#[tokio::test]
async fn test_password_recovery_does_not_log_in() {
    let stack = Stack::new();
    let otp = OtpConfig::default();
    let registration = stack.registration(AuthMethodsConfig::default(), &otp);
    let signup = InMemorySessionStore::new();
    let outcome = registration
        .register(&user_data(&[("email", "jane@example.com")]), &signup, Utc::now())
        .await
        .unwrap();

    let controller = stack.controller(
        VerificationConfig::from_otp_config(&otp, OtpReason::ForgetPassword)
            .for_reactivation()
            .with_redirect("/password/reset"),
    );
    let user = stack.users.find_by_id(outcome.user_id()).await.unwrap().unwrap();
    controller
        .resend(&user, "jane@example.com", OtpReason::ForgetPassword, Utc::now())
        .await
        .unwrap();
    let code = stack.last_email_code("jane@example.com").await;

    let session = InMemorySessionStore::new();
    let result = controller.verify(&session, "jane@example.com", &code).await;
    assert_eq!(
        result,
        VerifyOutcome::Verified {
            user_id: user.id,
            redirect_to: "/password/reset".to_string(),
            logged_in: false,
        }
    );
    assert!(VerificationSession::new(&session)
        .authenticated_user()
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_reactivation_reuses_live_code() {
    let stack = Stack::new();
    let otp = OtpConfig::default();
    let registration = stack.registration(AuthMethodsConfig::default(), &otp);
    let session = InMemorySessionStore::new();
    registration
        .register(&user_data(&[("email", "jane@example.com")]), &session, Utc::now())
        .await
        .unwrap();

    let again = registration
        .request_reactivation("jane@example.com", &session, Utc::now())
        .await
        .unwrap();
    assert_eq!(again, ReactivationOutcome::CodeAlreadySent);
    assert_eq!(stack.email.messages().await.len(), 1);

    let controller = stack.controller(
        VerificationConfig::from_otp_config(&otp, OtpReason::EmailActivation).for_reactivation(),
    );
    let code = stack.last_email_code("jane@example.com").await;
    let fresh_session = InMemorySessionStore::new();
    let result = controller.verify(&fresh_session, "jane@example.com", &code).await;
    assert!(result.is_verified());
}

#[tokio::test]
async fn test_unknown_identifier() {
    let stack = Stack::new();
    let controller = stack.controller(VerificationConfig::default());
    let session = InMemorySessionStore::new();

    let result = controller.verify(&session, "ghost@example.com", "123456").await;
    assert_eq!(result, VerifyOutcome::InvalidIdentifier);
}
