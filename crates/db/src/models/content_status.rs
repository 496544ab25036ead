//! Content status row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use copydesk_core::model::ContentStatus;
use copydesk_core::status::StatusTag;
use copydesk_core::types::Timestamp;

/// A row from the `content_statuses` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContentStatusRow {
    pub id: Uuid,
    pub content_id: Uuid,
    pub workflow_id: Uuid,
    pub current_stage_id: Uuid,
    pub status: String,
    pub updated_at: Timestamp,
}

impl From<ContentStatusRow> for ContentStatus {
    fn from(row: ContentStatusRow) -> Self {
        ContentStatus {
            id: row.id,
            content_id: row.content_id,
            workflow_id: row.workflow_id,
            current_stage_id: row.current_stage_id,
            status: StatusTag::from(row.status),
            updated_at: row.updated_at,
        }
    }
}
