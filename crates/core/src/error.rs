//! Error taxonomy and transition outcomes.
//!
//! Business-rule failures (unknown transition, missing role) are reported as
//! a [`TransitionOutcome`], not as errors: retrying them with the same input
//! cannot succeed, and callers present "not possible" and "not allowed"
//! differently. Only configuration defects and backend faults surface as
//! `Err`.

use std::fmt;

use uuid::Uuid;

use crate::status::StatusTag;

/// Failure from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An optimistic guard found the row changed underneath the caller.
    #[error("concurrent update conflict")]
    Conflict,

    /// Any other backend failure (connection, constraint, serialization).
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Failure from an engine operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The workflow configuration itself is inconsistent: no workflow, a
    /// workflow with no stages, or a status with no matching stage. This is
    /// a deployment/seed defect and is surfaced to the operator, never
    /// retried.
    #[error("workflow configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a transition request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The content item has no workflow state yet. Recovered by running the
    /// ensure-status bootstrap first.
    NotTracked,

    /// No transition is defined between the content's current status and
    /// the requested destination.
    InvalidTransition { from: StatusTag, to: StatusTag },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotTracked => write!(f, "content is not tracked by any workflow"),
            RejectReason::InvalidTransition { from, to } => {
                write!(f, "no transition defined from '{from}' to '{to}'")
            }
        }
    }
}

/// A successfully applied transition.
#[derive(Debug, Clone)]
pub struct AppliedTransition {
    pub content_id: Uuid,
    pub from_status: StatusTag,
    pub to_status: StatusTag,
    pub action: String,
}

/// Tri-state result of a transition request.
#[derive(Debug)]
pub enum TransitionOutcome {
    Applied(AppliedTransition),
    Rejected(RejectReason),
    /// The actor lacks the role the transition requires. Reported distinctly
    /// from [`RejectReason::InvalidTransition`].
    Forbidden { required_role: String },
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied(_))
    }
}
