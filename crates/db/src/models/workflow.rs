//! Workflow, stage and transition row models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use copydesk_core::model::{Stage, Transition, Workflow};
use copydesk_core::status::StatusTag;
use copydesk_core::types::Timestamp;

/// A row from the `workflows` table. Stages are loaded separately and
/// grouped in when building the domain model.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WorkflowRow {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl WorkflowRow {
    pub fn into_workflow(self, stages: Vec<StageRow>) -> Workflow {
        Workflow {
            id: self.id,
            name: self.name,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            stages: stages.into_iter().map(Stage::from).collect(),
        }
    }
}

/// A row from the `workflow_stages` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StageRow {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub status: String,
    pub stage_order: i32,
    pub name: String,
    pub role_name: String,
    pub instructions: Option<String>,
}

impl From<StageRow> for Stage {
    fn from(row: StageRow) -> Self {
        Stage {
            id: row.id,
            workflow_id: row.workflow_id,
            status: StatusTag::from(row.status),
            order: row.stage_order,
            name: row.name,
            role_name: row.role_name,
            instructions: row.instructions,
        }
    }
}

/// A row from the `workflow_transitions` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TransitionRow {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub from_status: String,
    pub to_status: String,
    pub action_name: String,
    pub required_role: String,
}

impl From<TransitionRow> for Transition {
    fn from(row: TransitionRow) -> Self {
        Transition {
            id: row.id,
            workflow_id: row.workflow_id,
            from_status: StatusTag::from(row.from_status),
            to_status: StatusTag::from(row.to_status),
            action_name: row.action_name,
            required_role: row.required_role,
        }
    }
}
