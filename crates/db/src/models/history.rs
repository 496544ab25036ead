//! Audit history row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use copydesk_core::model::HistoryEntry;
use copydesk_core::status::StatusTag;
use copydesk_core::types::Timestamp;

/// A row from the `content_state_history` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: Uuid,
    pub content_id: Uuid,
    pub from_status: String,
    pub to_status: String,
    pub action: String,
    pub comment: Option<String>,
    pub actor_id: String,
    pub timestamp: Timestamp,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        HistoryEntry {
            id: row.id,
            content_id: row.content_id,
            from_status: StatusTag::from(row.from_status),
            to_status: StatusTag::from(row.to_status),
            action: row.action,
            comment: row.comment,
            actor_id: row.actor_id,
            timestamp: row.timestamp,
        }
    }
}
