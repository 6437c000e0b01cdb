use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::ConsentRecord;

const CONSENT_COLUMNS: &str =
    "participant_id, first_name, last_name, handle, consent_given, is_minor, recorded_at";

pub struct ConsentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ConsentRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a consent grant. A re-grant after revocation flips the
    /// flag back on; the minor flag is preserved because only the
    /// admin surface may change it.
    pub async fn grant(
        &self,
        participant_id: i64,
        first_name: &str,
        last_name: Option<&str>,
        handle: Option<&str>,
    ) -> Result<ConsentRecord> {
        sqlx::query(
            r#"
            INSERT INTO consent (participant_id, first_name, last_name, handle, consent_given, recorded_at)
            VALUES (?, ?, ?, ?, 1, CURRENT_TIMESTAMP)
            ON CONFLICT(participant_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                handle = excluded.handle,
                consent_given = 1,
                recorded_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(participant_id)
        .bind(first_name)
        .bind(last_name)
        .bind(handle)
        .execute(self.pool)
        .await?;

        tracing::info!(participant_id, "consent granted");

        self.get(participant_id).await?.ok_or(StorageError::NotFound)
    }

    /// Flip consent off but keep the record.
    pub async fn revoke(&self, participant_id: i64) -> Result<()> {
        let result = sqlx::query("UPDATE consent SET consent_given = 0 WHERE participant_id = ?")
            .bind(participant_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(participant_id, "consent revoked");

        Ok(())
    }

    pub async fn get(&self, participant_id: i64) -> Result<Option<ConsentRecord>> {
        let record = sqlx::query_as::<_, ConsentRecord>(&format!(
            "SELECT {CONSENT_COLUMNS} FROM consent WHERE participant_id = ?"
        ))
        .bind(participant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// No record at all counts the same as a revoked one.
    pub async fn has_consent(&self, participant_id: i64) -> Result<bool> {
        let record = self.get(participant_id).await?;
        Ok(record.map(|r| r.consent_given).unwrap_or(false))
    }

    pub async fn is_minor(&self, participant_id: i64) -> Result<bool> {
        let record = self.get(participant_id).await?;
        Ok(record.map(|r| r.is_minor).unwrap_or(false))
    }

    pub async fn set_minor(&self, participant_id: i64, is_minor: bool) -> Result<()> {
        let result = sqlx::query("UPDATE consent SET is_minor = ? WHERE participant_id = ?")
            .bind(is_minor)
            .bind(participant_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Participant ids flagged as minors, for leaderboard partitioning.
    pub async fn minor_ids(&self) -> Result<HashSet<i64>> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT participant_id FROM consent WHERE is_minor = 1")
                .fetch_all(self.pool)
                .await?;

        Ok(ids.into_iter().collect())
    }
}
