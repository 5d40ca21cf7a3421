//! In-memory OTP record store
//!
//! A single write lock serialises `get_or_create` and `save`, which gives the
//! same guarantees as the unique index and versioned UPDATE of the MySQL
//! adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use og_core::domain::entities::{OtpReason, OtpRecord};
use og_core::errors::{DomainError, OtpError};
use og_core::repositories::OtpRepository;

#[derive(Clone, Default)]
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
}

impl InMemoryOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record stored for (user, reason), oldest first
    pub async fn history(&self, user_id: Uuid, reason: OtpReason) -> Vec<OtpRecord> {
        let mut found: Vec<OtpRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id && r.reason == reason)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.last_sent_at);
        found
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn get(&self, user_id: Uuid, reason: OtpReason) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id && r.reason == reason)
            .max_by_key(|r| (r.is_active(), r.last_sent_at))
            .cloned())
    }

    async fn get_or_create(
        &self,
        user_id: Uuid,
        reason: OtpReason,
        fresh: OtpRecord,
    ) -> Result<(OtpRecord, bool), DomainError> {
        let mut records = self.records.write().await;
        if let Some(existing) = records
            .values()
            .find(|r| r.user_id == user_id && r.reason == reason && r.is_active())
        {
            return Ok((existing.clone(), false));
        }

        tracing::debug!(user_id = %user_id, reason = %reason, "OTP record created");
        records.insert(fresh.id, fresh.clone());
        Ok((fresh, true))
    }

    async fn save(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&record.id)
            .ok_or(OtpError::RecordNotFound)?;

        if stored.version != record.version {
            tracing::debug!(
                record_id = %record.id,
                stored_version = stored.version,
                offered_version = record.version,
                "Stale OTP write rejected"
            );
            return Err(OtpError::StaleRecord.into());
        }

        let mut saved = record;
        saved.version += 1;
        *stored = saved.clone();
        Ok(saved)
    }
}
