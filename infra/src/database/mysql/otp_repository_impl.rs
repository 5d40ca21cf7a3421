//! MySQL implementation of the OtpRepository trait.
//!
//! The generated `active_key` column carries a unique index, so at most one
//! Active row exists per (user, reason). `save` is a versioned UPDATE.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use og_core::domain::entities::{OtpReason, OtpRecord, OtpState};
use og_core::errors::{DomainError, OtpError};
use og_core::repositories::OtpRepository;

use super::{column, db_error, is_unique_violation};

const OTP_COLUMNS: &str =
    "id, user_id, reason, token, state, last_sent_at, failed_attempts_count, version";

pub struct MySqlOtpRepository {
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value).map_err(|e| DomainError::Internal {
            message: format!("Invalid UUID: {}", e),
        })
    }

    fn row_to_record(row: &MySqlRow) -> Result<OtpRecord, DomainError> {
        let id: String = column(row, "id")?;
        let user_id: String = column(row, "user_id")?;
        let reason: String = column(row, "reason")?;
        let state: String = column(row, "state")?;

        Ok(OtpRecord {
            id: Self::parse_uuid(&id)?,
            user_id: Self::parse_uuid(&user_id)?,
            reason: reason.parse::<OtpReason>().map_err(DomainError::internal)?,
            token: column(row, "token")?,
            state: state.parse::<OtpState>().map_err(DomainError::internal)?,
            last_sent_at: column::<DateTime<Utc>>(row, "last_sent_at")?,
            failed_attempts_count: column(row, "failed_attempts_count")?,
            version: column(row, "version")?,
        })
    }

    async fn find_active(&self, user_id: Uuid, reason: OtpReason) -> Result<Option<OtpRecord>, DomainError> {
        let query = format!(
            "SELECT {} FROM otp_records WHERE user_id = ? AND reason = ? AND state = 'active' LIMIT 1",
            OTP_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(reason.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find_active_otp", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 FROM otp_records WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("otp_exists", e))?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn get(&self, user_id: Uuid, reason: OtpReason) -> Result<Option<OtpRecord>, DomainError> {
        let query = format!(
            r#"
            SELECT {} FROM otp_records
            WHERE user_id = ? AND reason = ?
            ORDER BY (state = 'active') DESC, last_sent_at DESC
            LIMIT 1
            "#,
            OTP_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(reason.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("get_otp", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn get_or_create(
        &self,
        user_id: Uuid,
        reason: OtpReason,
        fresh: OtpRecord,
    ) -> Result<(OtpRecord, bool), DomainError> {
        if let Some(existing) = self.find_active(user_id, reason).await? {
            return Ok((existing, false));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO otp_records (
                id, user_id, reason, token, state,
                last_sent_at, failed_attempts_count, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(fresh.id.to_string())
        .bind(user_id.to_string())
        .bind(reason.as_str())
        .bind(&fresh.token)
        .bind(fresh.state.as_str())
        .bind(fresh.last_sent_at)
        .bind(fresh.failed_attempts_count)
        .bind(fresh.version)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!(user_id = %user_id, reason = %reason, "OTP record created");
                Ok((fresh, true))
            }
            // A concurrent issuer inserted first; theirs is the active record
            Err(e) if is_unique_violation(&e) => self
                .find_active(user_id, reason)
                .await?
                .map(|existing| (existing, false))
                .ok_or_else(|| DomainError::internal("active OTP vanished after insert conflict")),
            Err(e) => Err(db_error("create_otp", e)),
        }
    }

    async fn save(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let done = sqlx::query(
            r#"
            UPDATE otp_records
            SET token = ?, state = ?, last_sent_at = ?,
                failed_attempts_count = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&record.token)
        .bind(record.state.as_str())
        .bind(record.last_sent_at)
        .bind(record.failed_attempts_count)
        .bind(record.id.to_string())
        .bind(record.version)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("save_otp", e))?;

        if done.rows_affected() == 0 {
            if self.exists(record.id).await? {
                tracing::debug!(record_id = %record.id, "Stale OTP write rejected");
                return Err(OtpError::StaleRecord.into());
            }
            return Err(OtpError::RecordNotFound.into());
        }

        let mut saved = record;
        saved.version += 1;
        Ok(saved)
    }
}
