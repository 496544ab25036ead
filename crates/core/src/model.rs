//! Domain models for workflows, stages, transitions, content state and the
//! audit history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::StatusTag;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Workflow configuration
// ---------------------------------------------------------------------------

/// A configured editorial pipeline. Owns its stages; stages are deleted with
/// their workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub stages: Vec<Stage>,
}

/// A pipeline position within a workflow.
///
/// `(workflow_id, status)` is unique: status-to-stage lookup must be
/// unambiguous within a workflow. `order` defines the pipeline position and
/// is unique within a workflow but not necessarily contiguous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub status: StatusTag,
    pub order: i32,
    pub name: String,
    /// Role whose members operate at this stage.
    pub role_name: String,
    pub instructions: Option<String>,
}

/// A directed, role-gated edge between two statuses within a workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub from_status: StatusTag,
    pub to_status: StatusTag,
    /// Human label, also the display/tie-break key.
    pub action_name: String,
    /// Role required to execute the transition. Empty means any actor with
    /// general workflow access.
    pub required_role: String,
}

impl Workflow {
    /// The stage with the lowest `order`, where new content enters the
    /// pipeline.
    pub fn initial_stage(&self) -> Option<&Stage> {
        self.stages.iter().min_by_key(|s| s.order)
    }

    /// Resolve the stage bound to `status`, if any.
    pub fn stage_for(&self, status: &StatusTag) -> Option<&Stage> {
        self.stages.iter().find(|s| &s.status == status)
    }
}

// ---------------------------------------------------------------------------
// Content state
// ---------------------------------------------------------------------------

/// The live binding of one content item to its current workflow stage.
/// At most one exists per content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentStatus {
    pub id: Uuid,
    /// Opaque identifier of the page/post owned by the host system.
    pub content_id: Uuid,
    pub workflow_id: Uuid,
    pub current_stage_id: Uuid,
    pub status: StatusTag,
    pub updated_at: Timestamp,
}

/// Read view of a content item's current position, with the stage display
/// name joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentStatusView {
    pub content_id: Uuid,
    pub status: StatusTag,
    pub stage_id: Uuid,
    pub stage_name: String,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Audit history
// ---------------------------------------------------------------------------

/// An immutable audit record of one applied transition.
///
/// Keyed by `content_id` only, so history survives workflow reconfiguration
/// and content-status deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub content_id: Uuid,
    pub from_status: StatusTag,
    pub to_status: StatusTag,
    pub action: String,
    pub comment: Option<String>,
    pub actor_id: String,
    pub timestamp: Timestamp,
}
