//! Repository for the `content_statuses` table.
//!
//! The two write paths pair the status row with its history entry inside
//! one transaction: no reader ever sees a status change without the
//! matching audit record.

use sqlx::PgPool;
use uuid::Uuid;

use copydesk_core::model::{ContentStatus, HistoryEntry};

use crate::models::content_status::ContentStatusRow;
use crate::repositories::HistoryRepo;

/// Column list for content_statuses queries.
const COLUMNS: &str = "id, content_id, workflow_id, current_stage_id, status, updated_at";

/// Provides operations on per-content workflow state.
pub struct ContentStatusRepo;

impl ContentStatusRepo {
    /// Find the workflow state for a content item.
    pub async fn find_by_content(
        pool: &PgPool,
        content_id: Uuid,
    ) -> Result<Option<ContentStatusRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_statuses WHERE content_id = $1");
        sqlx::query_as::<_, ContentStatusRow>(&query)
            .bind(content_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the initial state for a content item, together with its
    /// bootstrap history entry when supplied.
    ///
    /// Returns `false` without writing anything when the content item is
    /// already tracked; the unique binding constraint makes concurrent
    /// bootstrap calls converge on one row.
    pub async fn insert_if_absent(
        pool: &PgPool,
        status: &ContentStatus,
        initial_entry: Option<&HistoryEntry>,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO content_statuses
                (id, content_id, workflow_id, current_stage_id, status, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (content_id) DO NOTHING",
        )
        .bind(status.id)
        .bind(status.content_id)
        .bind(status.workflow_id)
        .bind(status.current_stage_id)
        .bind(status.status.as_str())
        .bind(status.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(entry) = initial_entry {
            HistoryRepo::insert(&mut *tx, entry).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Atomically move a content item to a new status and append the
    /// paired history entry.
    ///
    /// The UPDATE is guarded on the row still holding `expected_from`;
    /// a guard miss rolls the transaction back and returns `false` so the
    /// caller can re-validate against committed state.
    pub async fn update_guarded(
        pool: &PgPool,
        expected_from: &str,
        status: &ContentStatus,
        entry: &HistoryEntry,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE content_statuses
             SET status = $1, current_stage_id = $2, updated_at = $3
             WHERE content_id = $4 AND status = $5",
        )
        .bind(status.status.as_str())
        .bind(status.current_stage_id)
        .bind(status.updated_at)
        .bind(status.content_id)
        .bind(expected_from)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        HistoryRepo::insert(&mut *tx, entry).await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Delete the workflow state for a content item. Idempotent; returns
    /// the number of rows removed. History is untouched.
    pub async fn delete_by_content(pool: &PgPool, content_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_statuses WHERE content_id = $1")
            .bind(content_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
