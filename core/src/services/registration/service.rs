//! Registration service

use std::sync::Arc;

use chrono::{DateTime, Utc};

use og_shared::utils::identifier::mask_identifier;
use og_shared::{AuthMethod, AuthMethodsConfig, OtpConfig};

use crate::domain::entities::otp_record::OtpReason;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::{OtpRepository, SessionStore, UserRepository};
use crate::services::otp::{OtpLedger, OtpPolicy};
use crate::services::strategy::{StrategyResolver, UserData};
use crate::services::throttle::VerificationSession;
use crate::services::verification::{send_code, DeliveryChannel, NotificationSink};

use super::types::{ReactivationOutcome, RegistrationOutcome};

#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// Enabled identity channels
    pub auth_methods: AuthMethodsConfig,
    /// OTP flow when true, link activation otherwise
    pub send_otp: bool,
    pub policy: OtpPolicy,
}

impl RegistrationConfig {
    pub fn new(auth_methods: AuthMethodsConfig, otp: &OtpConfig) -> Self {
        Self {
            auth_methods,
            send_otp: otp.send_otp,
            policy: OtpPolicy::from_config(otp),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self::new(AuthMethodsConfig::default(), &OtpConfig::default())
    }
}

pub struct RegistrationService<U, O, N>
where
    U: UserRepository,
    O: OtpRepository,
    N: NotificationSink,
{
    users: Arc<U>,
    ledger: OtpLedger<O>,
    notifier: Arc<N>,
    config: RegistrationConfig,
}

impl<U, O, N> RegistrationService<U, O, N>
where
    U: UserRepository,
    O: OtpRepository,
    N: NotificationSink,
{
    pub fn new(users: Arc<U>, otps: Arc<O>, notifier: Arc<N>, config: RegistrationConfig) -> Self {
        Self {
            users,
            ledger: OtpLedger::new(otps),
            notifier,
            config,
        }
    }

    /// Create an inactive user and start activation.
    ///
    /// With `send_otp` the code goes to the email address if one was given,
    /// otherwise to the phone number, and the session is primed for
    /// `VerificationController::verify_pending`.
    pub async fn register(
        &self,
        user_data: &UserData,
        session: &dyn SessionStore,
        now: DateTime<Utc>,
    ) -> DomainResult<RegistrationOutcome> {
        let strategy = StrategyResolver::resolve(user_data, &self.config.auth_methods)?;
        strategy.validate(user_data)?;

        if !self.config.send_otp {
            let user = strategy.create_user(self.users.as_ref(), user_data).await?;
            return Ok(RegistrationOutcome::ActivationLinkPending { user_id: user.id });
        }

        let methods = strategy.methods();
        let delivery_method = [AuthMethod::EmailPassword, AuthMethod::PhonePassword]
            .into_iter()
            .find(|m| methods.contains(m))
            .ok_or_else(|| ValidationError::RequiredField {
                field: AuthMethod::EmailPassword.field().to_string(),
            })?;

        let user = strategy.create_user(self.users.as_ref(), user_data).await?;
        let identifier = user
            .identity(delivery_method)
            .map(str::to_string)
            .ok_or_else(|| ValidationError::RequiredField {
                field: delivery_method.field().to_string(),
            })?;
        let reason = activation_reason(DeliveryChannel::for_identifier(&identifier));

        let channel = self.send_activation(&user, &identifier, reason, now).await?;

        let view = VerificationSession::new(session);
        view.set_identifier(&identifier).await?;
        view.set_reason(reason).await?;
        view.mark_signup_pending().await?;

        tracing::info!(
            user_id = %user.id,
            identifier = %mask_identifier(&identifier),
            event = "user_registered",
            "Registered user, activation code sent"
        );
        Ok(RegistrationOutcome::CodeSent {
            user_id: user.id,
            channel,
        })
    }

    /// Resend activation for an existing account unless a code is still live
    pub async fn request_reactivation(
        &self,
        identifier: &str,
        session: &dyn SessionStore,
        now: DateTime<Utc>,
    ) -> DomainResult<ReactivationOutcome> {
        let user = self
            .users
            .get_by_identifier(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.is_block {
            return Err(AuthError::UserBlocked.into());
        }

        let (channel, _) = DeliveryChannel::resolve(&user, identifier)?;
        let reason = activation_reason(channel);
        if self
            .ledger
            .find_active(user.id, reason, now, self.config.policy.expiry_window)
            .await?
            .is_some()
        {
            tracing::info!(user_id = %user.id, "Reactivation requested while a code is active");
            return Ok(ReactivationOutcome::CodeAlreadySent);
        }

        if !self.config.send_otp {
            return Ok(ReactivationOutcome::ActivationLinkPending { user_id: user.id });
        }

        let channel = self.send_activation(&user, identifier, reason, now).await?;
        let view = VerificationSession::new(session);
        view.set_identifier(identifier).await?;
        view.set_reason(reason).await?;
        Ok(ReactivationOutcome::CodeSent { channel })
    }

    /// Resolve, validate, then authenticate through the matching strategy
    pub async fn authenticate(&self, user_data: &UserData) -> DomainResult<User> {
        let strategy = StrategyResolver::resolve(user_data, &self.config.auth_methods)?;
        strategy.validate(user_data)?;
        strategy.authenticate(self.users.as_ref(), user_data).await
    }

    async fn send_activation(
        &self,
        user: &User,
        identifier: &str,
        reason: OtpReason,
        now: DateTime<Utc>,
    ) -> DomainResult<DeliveryChannel> {
        let record = self
            .ledger
            .issue(user.id, reason, now, self.config.policy.expiry_window)
            .await?;
        send_code(self.notifier.as_ref(), &record.token, user, identifier).await
    }
}

fn activation_reason(channel: DeliveryChannel) -> OtpReason {
    match channel {
        DeliveryChannel::Email => OtpReason::EmailActivation,
        DeliveryChannel::Sms => OtpReason::PhoneActivation,
    }
}
