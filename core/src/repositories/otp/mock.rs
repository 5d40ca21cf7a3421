//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_record::{OtpReason, OtpRecord};
use crate::errors::{DomainError, OtpError};

use super::trait_::OtpRepository;

/// Mock OTP repository keeping every record ever issued
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
    pub should_fail: Arc<AtomicBool>,
    /// Number of upcoming saves that report a version conflict
    pub stale_saves: Arc<AtomicUsize>,
    /// Change applied to the stored record by the writer that wins the next conflict
    competing_write: Arc<Mutex<Option<CompetingWrite>>>,
}

type CompetingWrite = Box<dyn FnOnce(&mut OtpRecord) + Send>;

impl MockOtpRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
            stale_saves: Arc::new(AtomicUsize::new(0)),
            competing_write: Arc::new(Mutex::new(None)),
        }
    }

    /// Make the next save lose a race to a writer that applies `change` first
    pub fn lose_next_save_to(&self, change: impl FnOnce(&mut OtpRecord) + Send + 'static) {
        *self.competing_write.lock().unwrap() = Some(Box::new(change));
        self.stale_saves.fetch_add(1, Ordering::SeqCst);
    }

    /// Insert a record directly, bypassing the get-or-create rule
    pub async fn insert(&self, record: OtpRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Snapshot of a stored record by id
    pub async fn find(&self, id: Uuid) -> Option<OtpRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Number of records stored for (user, reason)
    pub async fn count_for(&self, user_id: Uuid, reason: OtpReason) -> usize {
        self.records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id && r.reason == reason)
            .count()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn check_fail(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("otp store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn get(&self, user_id: Uuid, reason: OtpReason) -> Result<Option<OtpRecord>, DomainError> {
        self.check_fail()?;
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
        self.check_fail()?;
        let mut records = self.records.write().await;
        if let Some(existing) = records
            .values()
            .find(|r| r.user_id == user_id && r.reason == reason && r.is_active())
        {
            return Ok((existing.clone(), false));
        }
        records.insert(fresh.id, fresh.clone());
        Ok((fresh, true))
    }

    async fn save(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check_fail()?;
        let mut records = self.records.write().await;

        let stale = self
            .stale_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if stale {
            // Simulate another writer winning the race
            let change = self.competing_write.lock().unwrap().take();
            if let Some(stored) = records.get_mut(&record.id) {
                if let Some(change) = change {
                    change(stored);
                }
                stored.version += 1;
            }
            return Err(OtpError::StaleRecord.into());
        }

        let stored = records
            .get_mut(&record.id)
            .ok_or(OtpError::RecordNotFound)?;
        if stored.version != record.version {
            return Err(OtpError::StaleRecord.into());
        }

        let mut saved = record;
        saved.version += 1;
        *stored = saved.clone();
        Ok(saved)
    }
}
