//! OTP ledger
//!
//! Every transition is persisted through `OtpRepository::save` before an
//! outcome is returned. `save` is compare-and-swap on the record version; a
//! lost race re-reads the record and re-runs the step, so a late mismatch can
//! never overwrite a consumed or expired record.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpReason, OtpRecord};
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::OtpRepository;

use super::policy::OtpPolicy;

/// Attempts per operation before a version conflict is surfaced
pub const MAX_WRITE_RETRIES: usize = 3;

/// Result of evaluating a submitted code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpOutcome {
    /// Code matched; the record is now consumed
    Success(OtpRecord),
    /// Window elapsed; the record is now expired
    Expired(OtpRecord),
    /// Attempt limit already reached; nothing was changed
    TooManyAttempts(OtpRecord),
    /// Code did not match; the failure was counted
    Mismatch { record: OtpRecord, attempts: u32 },
}

/// Owns OTP record transitions on top of an `OtpRepository`
pub struct OtpLedger<O: OtpRepository + ?Sized> {
    repo: Arc<O>,
}

impl<O: OtpRepository + ?Sized> Clone for OtpLedger<O> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<O: OtpRepository + ?Sized> OtpLedger<O> {
    pub fn new(repo: Arc<O>) -> Self {
        Self { repo }
    }

    /// Get or create the active record for (user, reason).
    ///
    /// An active record still inside its window is returned unchanged. One
    /// whose window has elapsed is retired and replaced with a fresh token.
    pub async fn issue(
        &self,
        user_id: Uuid,
        reason: OtpReason,
        now: DateTime<Utc>,
        expiry_window: Duration,
    ) -> DomainResult<OtpRecord> {
        for _ in 0..MAX_WRITE_RETRIES {
            let fresh = OtpRecord::new(user_id, reason, now);
            let (record, created) = self.repo.get_or_create(user_id, reason, fresh).await?;

            if created {
                tracing::info!(
                    user_id = %user_id,
                    reason = %reason,
                    otp_id = %record.id,
                    event = "otp_issued",
                    "Issued new OTP"
                );
                return Ok(record);
            }
            if !record.is_expired_at(now, expiry_window) {
                tracing::debug!(user_id = %user_id, reason = %reason, "Reusing active OTP");
                return Ok(record);
            }

            let mut stale = record;
            stale.mark_expired();
            match self.repo.save(stale).await {
                Ok(_) | Err(DomainError::Otp(OtpError::StaleRecord)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(OtpError::StaleRecord.into())
    }

    /// Evaluate a submitted code against the stored record.
    ///
    /// Order of checks: expiry (inclusive), attempt limit, match. Records that
    /// are already consumed or expired report `RecordNotFound` and are left
    /// untouched.
    pub async fn evaluate(
        &self,
        user_id: Uuid,
        reason: OtpReason,
        entered_code: &str,
        now: DateTime<Utc>,
        policy: &OtpPolicy,
    ) -> DomainResult<OtpOutcome> {
        for _ in 0..MAX_WRITE_RETRIES {
            let mut record = self
                .repo
                .get(user_id, reason)
                .await?
                .filter(OtpRecord::is_active)
                .ok_or(OtpError::RecordNotFound)?;

            if record.is_expired_at(now, policy.expiry_window) {
                record.mark_expired();
                match self.save_step(record).await? {
                    Some(saved) => return Ok(OtpOutcome::Expired(saved)),
                    None => continue,
                }
            }

            if record.failed_attempts_count >= policy.max_failed_attempts {
                return Ok(OtpOutcome::TooManyAttempts(record));
            }

            if record.matches(entered_code) {
                record.mark_consumed();
                match self.save_step(record).await? {
                    Some(saved) => return Ok(OtpOutcome::Success(saved)),
                    None => continue,
                }
            }

            record.record_failure();
            match self.save_step(record).await? {
                Some(saved) => {
                    let attempts = saved.failed_attempts_count;
                    return Ok(OtpOutcome::Mismatch {
                        record: saved,
                        attempts,
                    });
                }
                None => continue,
            }
        }

        tracing::warn!(
            user_id = %user_id,
            reason = %reason,
            retries = MAX_WRITE_RETRIES,
            "Gave up evaluating OTP after repeated version conflicts"
        );
        Err(OtpError::StaleRecord.into())
    }

    /// Retire the active record for (user, reason), if any
    pub async fn expire(&self, user_id: Uuid, reason: OtpReason) -> DomainResult<Option<OtpRecord>> {
        for _ in 0..MAX_WRITE_RETRIES {
            let Some(mut record) = self.repo.get(user_id, reason).await?.filter(OtpRecord::is_active) else {
                return Ok(None);
            };
            record.mark_expired();
            if let Some(saved) = self.save_step(record).await? {
                tracing::info!(user_id = %user_id, reason = %reason, "Expired active OTP");
                return Ok(Some(saved));
            }
        }
        Err(OtpError::StaleRecord.into())
    }

    /// Active record still inside its window, without creating one
    pub async fn find_active(
        &self,
        user_id: Uuid,
        reason: OtpReason,
        now: DateTime<Utc>,
        expiry_window: Duration,
    ) -> DomainResult<Option<OtpRecord>> {
        Ok(self
            .repo
            .get(user_id, reason)
            .await?
            .filter(|r| r.is_active() && !r.is_expired_at(now, expiry_window)))
    }

    /// `Ok(None)` when another writer won the race
    async fn save_step(&self, record: OtpRecord) -> DomainResult<Option<OtpRecord>> {
        match self.repo.save(record).await {
            Ok(saved) => Ok(Some(saved)),
            Err(DomainError::Otp(OtpError::StaleRecord)) => {
                tracing::debug!("OTP version conflict, re-reading record");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
