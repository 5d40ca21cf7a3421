//! Typed access to the verification keys of a caller's session

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpReason;
use crate::domain::entities::throttle_state::ThrottleState;
use crate::errors::DomainResult;
use crate::repositories::SessionStore;

/// Identifier the code was sent to. Historically named `email` even for phones.
pub const IDENTIFIER_KEY: &str = "email";
/// Signup-pending flag
pub const SIGNUP_PENDING_KEY: &str = "spa";
pub const MAX_COUNTER_KEY: &str = "max_counter";
pub const BLOCK_COUNT_KEY: &str = "block_count";
/// RFC 3339 timestamp
pub const LOCKOUT_START_KEY: &str = "lockout_start_time";
pub const REASON_KEY: &str = "reason";
/// Set when verification logs the user in
pub const AUTH_USER_KEY: &str = "auth_user_id";

/// Keys removed after a successful verification
const VERIFICATION_KEYS: [&str; 3] = [SIGNUP_PENDING_KEY, BLOCK_COUNT_KEY, MAX_COUNTER_KEY];

/// Wrapper over a `SessionStore` exposing only the keys this engine owns
pub struct VerificationSession<'a> {
    store: &'a dyn SessionStore,
}

impl<'a> VerificationSession<'a> {
    pub fn new(store: &'a dyn SessionStore) -> Self {
        Self { store }
    }

    /// Load throttle counters. Missing or malformed values read as zero / unset.
    pub async fn load_throttle(&self) -> DomainResult<ThrottleState> {
        let max_counter = self.read_number(MAX_COUNTER_KEY).await?;
        let block_count = self.read_number(BLOCK_COUNT_KEY).await?;
        let lockout_start_time = self
            .store
            .get(LOCKOUT_START_KEY)
            .await?
            .and_then(|v| DateTime::parse_from_rfc3339(&v).ok())
            .map(|t| t.with_timezone(&Utc));

        Ok(ThrottleState {
            max_counter,
            block_count,
            lockout_start_time,
        })
    }

    pub async fn save_throttle(&self, state: &ThrottleState) -> DomainResult<()> {
        self.store
            .set(MAX_COUNTER_KEY, state.max_counter.to_string())
            .await?;
        self.store
            .set(BLOCK_COUNT_KEY, state.block_count.to_string())
            .await?;
        match state.lockout_start_time {
            Some(start) => self.store.set(LOCKOUT_START_KEY, start.to_rfc3339()).await,
            None => self.store.delete(LOCKOUT_START_KEY).await,
        }
    }

    pub async fn identifier(&self) -> DomainResult<Option<String>> {
        self.store.get(IDENTIFIER_KEY).await
    }

    pub async fn set_identifier(&self, identifier: &str) -> DomainResult<()> {
        self.store.set(IDENTIFIER_KEY, identifier.to_string()).await
    }

    /// Stored reason; unknown values read as unset
    pub async fn reason(&self) -> DomainResult<Option<OtpReason>> {
        Ok(self
            .store
            .get(REASON_KEY)
            .await?
            .and_then(|v| v.parse().ok()))
    }

    pub async fn set_reason(&self, reason: OtpReason) -> DomainResult<()> {
        self.store.set(REASON_KEY, reason.as_str().to_string()).await
    }

    pub async fn is_signup_pending(&self) -> DomainResult<bool> {
        Ok(self.store.get(SIGNUP_PENDING_KEY).await?.is_some())
    }

    pub async fn mark_signup_pending(&self) -> DomainResult<()> {
        self.store.set(SIGNUP_PENDING_KEY, "true".to_string()).await
    }

    /// Drop the signup flag and throttle counters after a successful verification
    pub async fn clear_verification_keys(&self) -> DomainResult<()> {
        for key in VERIFICATION_KEYS {
            self.store.delete(key).await?;
        }
        Ok(())
    }

    /// Record the authenticated user for the host's session layer
    pub async fn login(&self, user_id: Uuid) -> DomainResult<()> {
        self.store.set(AUTH_USER_KEY, user_id.to_string()).await
    }

    pub async fn authenticated_user(&self) -> DomainResult<Option<Uuid>> {
        Ok(self
            .store
            .get(AUTH_USER_KEY)
            .await?
            .and_then(|v| Uuid::parse_str(&v).ok()))
    }

    async fn read_number(&self, key: &str) -> DomainResult<u32> {
        Ok(self
            .store
            .get(key)
            .await?
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0))
    }
}
