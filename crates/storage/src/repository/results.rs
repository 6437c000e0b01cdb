use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::{NewResult, ShooterResult, UpsertOutcome};

const RESULT_COLUMNS: &str =
    "participant_id, first_name, last_name, handle, best_series, accessory_tens, updated_at";

pub struct ResultRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Conditionally write a submission: a stored result is replaced
    /// only by a strictly better one under the lexicographic
    /// `(best_series, accessory_tens)` ordering.
    ///
    /// The read-compare-write runs in a single transaction so two
    /// racing submissions for the same participant cannot regress the
    /// stored best. Returns the outcome together with the previously
    /// stored result, which the caller needs for promotion detection.
    pub async fn upsert_if_better(
        &self,
        new: &NewResult,
    ) -> Result<(UpsertOutcome, Option<ShooterResult>)> {
        let mut tx = self.pool.begin().await?;

        let previous = sqlx::query_as::<_, ShooterResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results WHERE participant_id = ?"
        ))
        .bind(new.participant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match &previous {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO results
                        (participant_id, first_name, last_name, handle, best_series, accessory_tens, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
                    "#,
                )
                .bind(new.participant_id)
                .bind(&new.first_name)
                .bind(&new.last_name)
                .bind(&new.handle)
                .bind(new.best_series)
                .bind(new.accessory_tens)
                .execute(&mut *tx)
                .await?;

                UpsertOutcome::Inserted
            }
            Some(prev) if new.score_key() > prev.score_key() => {
                sqlx::query(
                    r#"
                    UPDATE results
                    SET first_name = ?,
                        last_name = ?,
                        handle = ?,
                        best_series = ?,
                        accessory_tens = ?,
                        updated_at = CURRENT_TIMESTAMP
                    WHERE participant_id = ?
                    "#,
                )
                .bind(&new.first_name)
                .bind(&new.last_name)
                .bind(&new.handle)
                .bind(new.best_series)
                .bind(new.accessory_tens)
                .bind(new.participant_id)
                .execute(&mut *tx)
                .await?;

                UpsertOutcome::Updated
            }
            Some(_) => UpsertOutcome::Rejected,
        };

        tx.commit().await?;

        Ok((outcome, previous))
    }

    pub async fn get(&self, participant_id: i64) -> Result<Option<ShooterResult>> {
        let result = sqlx::query_as::<_, ShooterResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results WHERE participant_id = ?"
        ))
        .bind(participant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// All stored results. Ordering is the leaderboard engine's job;
    /// the key order here is only for stable scans.
    pub async fn list_all(&self) -> Result<Vec<ShooterResult>> {
        let results = sqlx::query_as::<_, ShooterResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results ORDER BY participant_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    /// Overwrite a participant's stored result regardless of ordering.
    /// Admin-only escape hatch; normal submissions go through
    /// `upsert_if_better`.
    pub async fn overwrite(
        &self,
        participant_id: i64,
        best_series: i64,
        accessory_tens: i64,
    ) -> Result<ShooterResult> {
        let result = sqlx::query(
            r#"
            UPDATE results
            SET best_series = ?, accessory_tens = ?, updated_at = CURRENT_TIMESTAMP
            WHERE participant_id = ?
            "#,
        )
        .bind(best_series)
        .bind(accessory_tens)
        .bind(participant_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get(participant_id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, participant_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM results WHERE participant_id = ?")
            .bind(participant_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Atomically copy every live result into the archive under the
    /// given period label and clear the results table.
    ///
    /// `INSERT OR REPLACE` keyed on `(period, participant_id)` makes a
    /// re-run for the same period overwrite rather than duplicate, so
    /// a retried cycle is safe. A submission racing the reset lands
    /// either before the transaction (and is archived) or after it
    /// (and opens the new period); it is never dropped.
    pub async fn archive_and_reset(&self, period: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let archived = sqlx::query(
            r#"
            INSERT OR REPLACE INTO results_archive
                (period, participant_id, first_name, last_name, handle,
                 best_series, accessory_tens, updated_at, archived_at)
            SELECT ?, participant_id, first_name, last_name, handle,
                   best_series, accessory_tens, updated_at, CURRENT_TIMESTAMP
            FROM results
            "#,
        )
        .bind(period)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM results").execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(period, archived, "results archived and cleared");

        Ok(archived)
    }

    /// Archived results for one period, most recent scores first.
    pub async fn list_archived(&self, period: &str) -> Result<Vec<ShooterResult>> {
        let results = sqlx::query_as::<_, ShooterResult>(&format!(
            r#"
            SELECT {RESULT_COLUMNS} FROM results_archive
            WHERE period = ?
            ORDER BY best_series DESC, accessory_tens DESC
            "#
        ))
        .bind(period)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }
}
