//! Repository for the `content_state_history` table.
//!
//! Append-only: there is no update or delete. History is keyed by content
//! id alone so it survives workflow reconfiguration and content-status
//! deletion.

use sqlx::PgPool;
use uuid::Uuid;

use copydesk_core::model::HistoryEntry;

use crate::models::history::HistoryRow;

/// Column list for content_state_history queries.
const COLUMNS: &str =
    "id, content_id, from_status, to_status, action, comment, actor_id, timestamp";

/// Provides append and query operations for the audit history.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one history entry.
    ///
    /// Takes any executor so the insert can join the transaction that
    /// carries the paired status write.
    pub async fn insert<'e, E>(executor: E, entry: &HistoryEntry) -> Result<(), sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO content_state_history
                (id, content_id, from_status, to_status, action, comment, actor_id, timestamp)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(entry.id)
        .bind(entry.content_id)
        .bind(entry.from_status.as_str())
        .bind(entry.to_status.as_str())
        .bind(&entry.action)
        .bind(&entry.comment)
        .bind(&entry.actor_id)
        .bind(entry.timestamp)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// All history for a content item, timestamp ascending.
    pub async fn list_by_content(
        pool: &PgPool,
        content_id: Uuid,
    ) -> Result<Vec<HistoryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_state_history
             WHERE content_id = $1
             ORDER BY timestamp ASC"
        );
        sqlx::query_as::<_, HistoryRow>(&query)
            .bind(content_id)
            .fetch_all(pool)
            .await
    }
}
