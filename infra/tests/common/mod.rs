//! Shared wiring for the end-to-end flows

#![allow(dead_code)]

use std::sync::Arc;

use og_core::services::registration::{RegistrationConfig, RegistrationService};
use og_core::services::strategy::UserData;
use og_core::services::verification::{VerificationConfig, VerificationController};
use og_infra::email::MockEmailService;
use og_infra::events::BroadcastEventSink;
use og_infra::memory::{InMemoryOtpRepository, InMemoryUserRepository};
use og_infra::sms::MockSmsService;
use og_infra::NotificationDispatcher;
use og_shared::{AuthMethodsConfig, OtpConfig};

pub type Controller = VerificationController<
    InMemoryUserRepository,
    InMemoryOtpRepository,
    NotificationDispatcher,
    BroadcastEventSink,
>;

pub type Registration =
    RegistrationService<InMemoryUserRepository, InMemoryOtpRepository, NotificationDispatcher>;

pub struct Stack {
    pub users: Arc<InMemoryUserRepository>,
    pub otps: Arc<InMemoryOtpRepository>,
    pub sms: MockSmsService,
    pub email: MockEmailService,
    pub notifier: Arc<NotificationDispatcher>,
    pub events: Arc<BroadcastEventSink>,
}

impl Stack {
    pub fn new() -> Self {
        let sms = MockSmsService::new();
        let email = MockEmailService::new();
        let notifier = Arc::new(NotificationDispatcher::new(
            Arc::new(sms.clone()),
            Arc::new(email.clone()),
        ));
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            otps: Arc::new(InMemoryOtpRepository::new()),
            sms,
            email,
            notifier,
            events: Arc::new(BroadcastEventSink::new()),
        }
    }

    pub fn registration(&self, auth_methods: AuthMethodsConfig, otp: &OtpConfig) -> Registration {
        RegistrationService::new(
            self.users.clone(),
            self.otps.clone(),
            self.notifier.clone(),
            RegistrationConfig::new(auth_methods, otp),
        )
    }

    pub fn controller(&self, config: VerificationConfig) -> Controller {
        VerificationController::new(
            self.users.clone(),
            self.otps.clone(),
            self.notifier.clone(),
            self.events.clone(),
            config,
        )
    }

    pub async fn last_email_code(&self, email: &str) -> String {
        let message = self.email.last_message_to(email).await.expect("no email sent");
        digits(&message.body)
    }

    pub async fn last_sms_code(&self, phone: &str) -> String {
        let message = self.sms.last_message_to(phone).await.expect("no sms sent");
        digits(&message.message)
    }
}

pub fn digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// A six-digit code guaranteed to differ from `code`
pub fn wrong_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_string()
    } else {
        "000000".to_string()
    }
}

pub fn user_data(pairs: &[(&str, &str)]) -> UserData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
