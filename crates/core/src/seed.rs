//! Default workflow seed definition.
//!
//! Built as plain domain values so any backend can install it: the db crate
//! inserts it when the workflow table is empty, and the in-memory backend
//! loads it directly for tests and demos.

use uuid::Uuid;

use crate::actions::{
    ACTION_APPROVE, ACTION_PUBLISH, ACTION_REJECT, ACTION_RETURN_TO_DRAFT, ACTION_SEND_LEGAL,
    ACTION_SUBMIT_EDITORIAL,
};
use crate::model::{Stage, Transition, Workflow};
use crate::roles::{ROLE_AUTHOR, ROLE_DIRECTOR, ROLE_EDITOR, ROLE_LEGAL};
use crate::status::{
    StatusTag, STATUS_APPROVED, STATUS_DRAFT, STATUS_EDITORIAL_REVIEW, STATUS_LEGAL_REVIEW,
    STATUS_PUBLISHED,
};

/// A complete workflow configuration ready to install.
#[derive(Debug, Clone)]
pub struct WorkflowSeed {
    pub workflow: Workflow,
    pub transitions: Vec<Transition>,
}

/// The default five-stage editorial pipeline.
///
/// Draft → Editorial Review → Legal Review → Final Approval → Published,
/// with rejection edges from every review stage back to Draft and a
/// return-to-draft edge from Published.
pub fn default_workflow() -> WorkflowSeed {
    let workflow_id = Uuid::new_v4();

    let stage = |status: &str, order: i32, name: &str, role: &str, instructions: &str| Stage {
        id: Uuid::new_v4(),
        workflow_id,
        status: StatusTag::from(status),
        order,
        name: name.to_string(),
        role_name: role.to_string(),
        instructions: Some(instructions.to_string()),
    };

    let stages = vec![
        stage(STATUS_DRAFT, 0, "Draft", ROLE_AUTHOR, "Initial authoring of the content."),
        stage(
            STATUS_EDITORIAL_REVIEW,
            1,
            "Editorial Review",
            ROLE_EDITOR,
            "Check clarity and style.",
        ),
        stage(
            STATUS_LEGAL_REVIEW,
            2,
            "Legal Review",
            ROLE_LEGAL,
            "Confirm legal compliance.",
        ),
        stage(
            STATUS_APPROVED,
            3,
            "Final Approval",
            ROLE_DIRECTOR,
            "Approve for final publication.",
        ),
        stage(STATUS_PUBLISHED, 4, "Published", ROLE_DIRECTOR, "Live content."),
    ];

    let transition = |from: &str, to: &str, action: &str, role: &str| Transition {
        id: Uuid::new_v4(),
        workflow_id,
        from_status: StatusTag::from(from),
        to_status: StatusTag::from(to),
        action_name: action.to_string(),
        required_role: role.to_string(),
    };

    let transitions = vec![
        transition(STATUS_DRAFT, STATUS_EDITORIAL_REVIEW, ACTION_SUBMIT_EDITORIAL, ROLE_AUTHOR),
        transition(STATUS_EDITORIAL_REVIEW, STATUS_LEGAL_REVIEW, ACTION_SEND_LEGAL, ROLE_EDITOR),
        transition(STATUS_LEGAL_REVIEW, STATUS_APPROVED, ACTION_APPROVE, ROLE_LEGAL),
        transition(STATUS_APPROVED, STATUS_PUBLISHED, ACTION_PUBLISH, ROLE_DIRECTOR),
        transition(STATUS_EDITORIAL_REVIEW, STATUS_DRAFT, ACTION_REJECT, ROLE_EDITOR),
        transition(STATUS_LEGAL_REVIEW, STATUS_DRAFT, ACTION_REJECT, ROLE_LEGAL),
        transition(STATUS_APPROVED, STATUS_DRAFT, ACTION_REJECT, ROLE_DIRECTOR),
        transition(STATUS_PUBLISHED, STATUS_DRAFT, ACTION_RETURN_TO_DRAFT, ROLE_DIRECTOR),
    ];

    WorkflowSeed {
        workflow: Workflow {
            id: workflow_id,
            name: "Default Editorial".to_string(),
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: None,
            stages,
        },
        transitions,
    }
}
