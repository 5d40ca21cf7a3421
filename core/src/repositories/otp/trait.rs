//! OTP record repository trait.
//!
//! Implementations own the one-active-record-per-(user, reason) guarantee
//! through `get_or_create`, and serialise writers through `save`, which is a
//! compare-and-swap on `OtpRecord::version`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpReason, OtpRecord};
use crate::errors::DomainError;

#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Most recent record for (user, reason), in any state
    async fn get(&self, user_id: Uuid, reason: OtpReason) -> Result<Option<OtpRecord>, DomainError>;

    /// Return the Active record for (user, reason), inserting `fresh` when
    /// there is none. The flag is `true` when `fresh` was inserted.
    async fn get_or_create(
        &self,
        user_id: Uuid,
        reason: OtpReason,
        fresh: OtpRecord,
    ) -> Result<(OtpRecord, bool), DomainError>;

    /// Persist `record` if its `version` still matches the stored one.
    ///
    /// Returns the stored record with its version bumped. A version mismatch
    /// fails with `OtpError::StaleRecord` and leaves the stored row untouched.
    async fn save(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;
}
