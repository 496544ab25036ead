//! Collaborator port traits.
//!
//! The engine consumes everything through these seams: the backing store,
//! the audit history, the host system's permission resolution and
//! publish/unpublish hooks, and metrics emission. The db crate implements
//! the store traits over PostgreSQL; the engine crate ships an in-memory
//! backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{ContentStatus, HistoryEntry, Stage, Transition, Workflow};
use crate::status::StatusTag;

/// Storage for workflow configuration and per-content state.
///
/// `create_status` and `commit_transition` pair the state write with its
/// history entry in one atomic operation: no observer may see a status
/// update without the matching audit record, and a failure must leave both
/// untouched.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Current workflow state for a content item.
    async fn get_status(&self, content_id: Uuid) -> Result<Option<ContentStatus>, StoreError>;

    /// Insert the initial workflow state for a content item, together with
    /// its bootstrap history entry when one is supplied.
    ///
    /// Returns `false` without writing anything when the content item is
    /// already tracked, making concurrent bootstrap calls safe.
    async fn create_status(
        &self,
        status: &ContentStatus,
        initial_entry: Option<&HistoryEntry>,
    ) -> Result<bool, StoreError>;

    /// Atomically persist a mutated status and its paired history entry.
    ///
    /// The write is guarded on the content item still being in
    /// `expected_from`; returns `false` without writing anything when the
    /// guard fails, so the caller can re-validate against committed state.
    async fn commit_transition(
        &self,
        expected_from: &StatusTag,
        status: &ContentStatus,
        entry: &HistoryEntry,
    ) -> Result<bool, StoreError>;

    /// Remove the workflow state for a content item. Idempotent; returns
    /// the number of records removed. Never touches history.
    async fn delete_status(&self, content_id: Uuid) -> Result<u64, StoreError>;

    /// All configured workflows with their stages loaded.
    async fn list_workflows(&self) -> Result<Vec<Workflow>, StoreError>;

    /// Resolve the stage bound to `status` within a workflow.
    async fn find_stage(
        &self,
        workflow_id: Uuid,
        status: &StatusTag,
    ) -> Result<Option<Stage>, StoreError>;

    /// All transitions leaving `from` within a workflow, in stable store
    /// order.
    async fn list_transitions_from(
        &self,
        workflow_id: Uuid,
        from: &StatusTag,
    ) -> Result<Vec<Transition>, StoreError>;

    /// The transition between `from` and `to` within a workflow, if defined.
    async fn find_transition(
        &self,
        workflow_id: Uuid,
        from: &StatusTag,
        to: &StatusTag,
    ) -> Result<Option<Transition>, StoreError>;
}

/// Append-only audit history, ordered by timestamp when read back.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), StoreError>;

    /// All history for a content item, timestamp ascending.
    async fn list_for_content(&self, content_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError>;
}

/// Maps an actor onto role membership. Implemented by the host system's
/// identity layer, consumed by the engine.
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    async fn has_role(&self, actor_id: &str, role: &str) -> bool;

    /// Whether the actor may use workflow features at all.
    async fn has_general_access(&self, actor_id: &str) -> bool;
}

/// Publish/unpublish hooks into the content-management host. Called only on
/// transitions into the published and draft statuses.
#[async_trait]
pub trait ContentPublisher: Send + Sync {
    async fn is_published(&self, content_id: Uuid) -> anyhow::Result<bool>;

    async fn set_published(&self, content_id: Uuid, published: bool) -> anyhow::Result<()>;
}

/// Fire-and-forget metrics and tracing emission.
pub trait MetricsSink: Send + Sync {
    fn increment_counter(&self, name: &'static str, labels: &[(&'static str, String)]);

    fn record_duration(&self, name: &'static str, seconds: f64, labels: &[(&'static str, String)]);

    /// A span covering one engine operation. Implementations may return
    /// `Span::none()`.
    fn start_span(&self, name: &'static str) -> tracing::Span;
}

/// Picks the workflow governing new content.
///
/// The default deployment runs exactly one active workflow system-wide;
/// multi-workflow routing (per content type, per site) is a configuration
/// extension implemented behind this trait.
#[async_trait]
pub trait ActiveWorkflowResolver: Send + Sync {
    async fn active_workflow(
        &self,
        store: &dyn WorkflowStore,
    ) -> Result<Option<Workflow>, StoreError>;
}

/// Default resolver: the first active workflow in store order.
pub struct FirstActiveWorkflow;

#[async_trait]
impl ActiveWorkflowResolver for FirstActiveWorkflow {
    async fn active_workflow(
        &self,
        store: &dyn WorkflowStore,
    ) -> Result<Option<Workflow>, StoreError> {
        let workflows = store.list_workflows().await?;
        Ok(workflows.into_iter().find(|w| w.is_active))
    }
}
