//! Verification controller implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};

use og_shared::utils::identifier::mask_identifier;

use crate::domain::entities::otp_record::{OtpReason, OtpRecord};
use crate::domain::entities::user::User;
use crate::domain::events::OtpEvent;
use crate::errors::{AuthError, DomainError, DomainResult, OtpError};
use crate::repositories::{OtpRepository, SessionStore, UserRepository};
use crate::services::otp::{OtpLedger, OtpOutcome};
use crate::services::throttle::{AttemptThrottle, ThrottleDecision, VerificationSession};

use super::config::VerificationConfig;
use super::delivery::send_code;
use super::traits::{EventSink, NotificationSink};
use super::types::VerifyOutcome;

/// Runs one verification attempt end to end
pub struct VerificationController<U, O, N, E>
where
    U: UserRepository,
    O: OtpRepository,
    N: NotificationSink,
    E: EventSink,
{
    /// User persistence
    users: Arc<U>,
    /// OTP record transitions
    ledger: OtpLedger<O>,
    /// Code delivery
    notifier: Arc<N>,
    /// Domain event sink
    events: Arc<E>,
    /// Session throttle rules
    throttle: AttemptThrottle,
    /// Controller configuration
    config: VerificationConfig,
}

impl<U, O, N, E> VerificationController<U, O, N, E>
where
    U: UserRepository,
    O: OtpRepository,
    N: NotificationSink,
    E: EventSink,
{
    /// Create a new verification controller
    pub fn new(
        users: Arc<U>,
        otps: Arc<O>,
        notifier: Arc<N>,
        events: Arc<E>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            users,
            ledger: OtpLedger::new(otps),
            notifier,
            events,
            throttle: AttemptThrottle::new(config.throttle),
            config,
        }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Verify `entered_code` for `identifier` within the caller's session
    pub async fn verify(
        &self,
        session: &dyn SessionStore,
        identifier: &str,
        entered_code: &str,
    ) -> VerifyOutcome {
        self.verify_at(session, identifier, entered_code, Utc::now()).await
    }

    /// Verify against the identifier stored in the session by signup or reactivation
    pub async fn verify_pending(&self, session: &dyn SessionStore, entered_code: &str) -> VerifyOutcome {
        let view = VerificationSession::new(session);
        match view.identifier().await {
            Ok(Some(identifier)) => self.verify(session, &identifier, entered_code).await,
            Ok(None) => {
                tracing::warn!(event = "otp_no_identifier", "Session carries no identifier");
                VerifyOutcome::InvalidIdentifier
            }
            Err(e) => self.fail(self.config.reason, &e).await,
        }
    }

    /// Verify with an explicit clock.
    ///
    /// This is the single point where typed failures become caller outcomes.
    pub async fn verify_at(
        &self,
        session: &dyn SessionStore,
        identifier: &str,
        entered_code: &str,
        now: DateTime<Utc>,
    ) -> VerifyOutcome {
        let view = VerificationSession::new(session);
        let reason = match view.reason().await {
            Ok(stored) => stored.unwrap_or(self.config.reason),
            Err(e) => return self.fail(self.config.reason, &e).await,
        };

        match self.run(&view, identifier, entered_code, reason, now).await {
            Ok(outcome) => outcome,
            Err(DomainError::Auth(AuthError::UserNotFound)) => {
                tracing::warn!(
                    identifier = %mask_identifier(identifier),
                    event = "otp_unknown_identifier",
                    "Verification for unknown identifier"
                );
                VerifyOutcome::InvalidIdentifier
            }
            Err(DomainError::Otp(OtpError::RecordNotFound)) => {
                tracing::warn!(
                    identifier = %mask_identifier(identifier),
                    reason = %reason,
                    event = "otp_record_missing",
                    "No active OTP for verification"
                );
                VerifyOutcome::RestartRequired
            }
            Err(e) => self.fail(reason, &e).await,
        }
    }

    async fn run(
        &self,
        session: &VerificationSession<'_>,
        identifier: &str,
        entered_code: &str,
        reason: OtpReason,
        now: DateTime<Utc>,
    ) -> DomainResult<VerifyOutcome> {
        let user = self
            .users
            .get_by_identifier(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_block {
            tracing::info!(user_id = %user.id, event = "otp_rejected_blocked", "Blocked user attempted verification");
            return Ok(VerifyOutcome::Blocked);
        }

        if !self.config.reactivation && !session.is_signup_pending().await? {
            tracing::warn!(user_id = %user.id, event = "otp_unauthorized", "Verification without pending signup");
            return Ok(VerifyOutcome::Unauthorized);
        }

        let mut state = session.load_throttle().await?;
        match self.throttle.check(&mut state, now) {
            ThrottleDecision::Block => {
                self.block_user(user, reason).await?;
                return Ok(VerifyOutcome::BlockedNow);
            }
            ThrottleDecision::Locked { remaining } => {
                session.save_throttle(&state).await?;
                let secs = remaining.num_seconds();
                tracing::info!(
                    user_id = %user.id,
                    block_count = state.block_count,
                    remaining_seconds = secs,
                    event = "otp_locked_out",
                    "Verification attempt during lockout"
                );
                return Ok(VerifyOutcome::LockedOut {
                    minutes: secs / 60,
                    seconds: secs % 60,
                });
            }
            ThrottleDecision::LockoutElapsed => {
                session.save_throttle(&state).await?;
                tracing::info!(user_id = %user.id, event = "otp_lockout_elapsed", "Lockout elapsed, counters reset");
                return Ok(VerifyOutcome::LockoutElapsed);
            }
            ThrottleDecision::Allowed => session.save_throttle(&state).await?,
        }

        let policy = &self.config.policy;
        match self
            .ledger
            .evaluate(user.id, reason, entered_code, now, policy)
            .await?
        {
            OtpOutcome::Success(_) => self.on_success(session, user, reason).await,
            OtpOutcome::Expired(_) => {
                self.events.emit(OtpEvent::expired(user.id, reason)).await;
                self.resend(&user, identifier, reason, now).await?;
                Ok(VerifyOutcome::Expired)
            }
            OtpOutcome::TooManyAttempts(record) => {
                self.on_exhausted(&user, identifier, record, now).await
            }
            OtpOutcome::Mismatch { record, attempts } if attempts >= policy.max_failed_attempts => {
                self.on_exhausted(&user, identifier, record, now).await
            }
            OtpOutcome::Mismatch { attempts, .. } => {
                tracing::info!(
                    user_id = %user.id,
                    attempts = attempts,
                    event = "otp_failed",
                    "Incorrect verification code"
                );
                self.events
                    .emit(OtpEvent::failed(Some(user.id), reason, attempts))
                    .await;
                Ok(VerifyOutcome::IncorrectCode { attempts })
            }
        }
    }

    async fn on_success(
        &self,
        session: &VerificationSession<'_>,
        mut user: User,
        reason: OtpReason,
    ) -> DomainResult<VerifyOutcome> {
        user.activate();
        let user = self.users.save(user).await?;
        self.events.emit(OtpEvent::verified(user.id, reason)).await;

        session.clear_verification_keys().await?;
        let logged_in = !reason.is_password_recovery();
        if logged_in {
            session.login(user.id).await?;
        }

        tracing::info!(
            user_id = %user.id,
            reason = %reason,
            logged_in = logged_in,
            event = "otp_verified",
            "Verification succeeded"
        );
        Ok(VerifyOutcome::Verified {
            user_id: user.id,
            redirect_to: self.config.redirect_to.clone(),
            logged_in,
        })
    }

    /// Attempt limit reached: retire the code and send a new one
    async fn on_exhausted(
        &self,
        user: &User,
        identifier: &str,
        record: OtpRecord,
        now: DateTime<Utc>,
    ) -> DomainResult<VerifyOutcome> {
        let attempts = record.failed_attempts_count;
        tracing::warn!(
            user_id = %user.id,
            attempts = attempts,
            event = "otp_failed",
            "Attempt limit reached, issuing a new code"
        );
        self.ledger.expire(user.id, record.reason).await?;
        self.events
            .emit(OtpEvent::failed(Some(user.id), record.reason, attempts))
            .await;
        self.resend(user, identifier, record.reason, now).await?;
        Ok(VerifyOutcome::TooManyAttempts)
    }

    /// Issue (or reuse) the active code and deliver it to the user's stored
    /// address on the channel `identifier` implies
    pub async fn resend(
        &self,
        user: &User,
        identifier: &str,
        reason: OtpReason,
        now: DateTime<Utc>,
    ) -> DomainResult<OtpRecord> {
        let record = self
            .ledger
            .issue(user.id, reason, now, self.config.policy.expiry_window)
            .await?;
        send_code(self.notifier.as_ref(), &record.token, user, identifier).await?;
        Ok(record)
    }

    /// Block the account and retire its outstanding code for `reason`
    pub async fn block_user(&self, mut user: User, reason: OtpReason) -> DomainResult<User> {
        user.block();
        let user = self.users.save(user).await?;

        match self.ledger.expire(user.id, reason).await? {
            Some(_) => {}
            None => tracing::info!(
                user_id = %user.id,
                reason = %reason,
                "No outstanding OTP to expire for blocked user"
            ),
        }

        tracing::warn!(user_id = %user.id, event = "user_blocked", "User blocked after repeated lockouts");
        Ok(user)
    }

    /// Log, emit a zero-attempt failure event, and report generically
    async fn fail(&self, reason: OtpReason, error: &DomainError) -> VerifyOutcome {
        tracing::error!(
            error = %error,
            error_code = error.error_code(),
            reason = %reason,
            event = "otp_verification_error",
            "Unexpected failure during verification"
        );
        self.events.emit(OtpEvent::failed(None, reason, 0)).await;
        VerifyOutcome::Failed
    }
}
