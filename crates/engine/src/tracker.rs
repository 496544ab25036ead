//! Content status lifecycle: bootstrap, read view, removal.

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use copydesk_core::actions::ACTION_INITIAL_CREATION;
use copydesk_core::error::EngineError;
use copydesk_core::metric_names::SPAN_ENSURE_STATUS;
use copydesk_core::model::{ContentStatus, ContentStatusView, HistoryEntry};
use copydesk_core::ports::{ActiveWorkflowResolver, HistoryStore, MetricsSink, WorkflowStore};
use copydesk_core::status::StatusTag;

use crate::draft_cache::DraftEntryCache;

/// Tracks which content items are bound to a workflow and where they stand.
pub struct StatusTracker {
    store: Arc<dyn WorkflowStore>,
    history: Arc<dyn HistoryStore>,
    resolver: Arc<dyn ActiveWorkflowResolver>,
    metrics: Arc<dyn MetricsSink>,
    draft_cache: Arc<DraftEntryCache>,
    draft_status: StatusTag,
}

impl StatusTracker {
    pub fn new(
        store: Arc<dyn WorkflowStore>,
        history: Arc<dyn HistoryStore>,
        resolver: Arc<dyn ActiveWorkflowResolver>,
        metrics: Arc<dyn MetricsSink>,
        draft_cache: Arc<DraftEntryCache>,
        draft_status: StatusTag,
    ) -> Self {
        Self {
            store,
            history,
            resolver,
            metrics,
            draft_cache,
            draft_status,
        }
    }

    /// Attach a content item to the active workflow if it is not tracked
    /// yet. Idempotent: repeated calls never create a second state record
    /// or a duplicate bootstrap history entry.
    pub async fn ensure_status(&self, content_id: Uuid, actor_id: &str) -> Result<(), EngineError> {
        let span = self.metrics.start_span(SPAN_ENSURE_STATUS);
        self.ensure_inner(content_id, actor_id).instrument(span).await
    }

    async fn ensure_inner(&self, content_id: Uuid, actor_id: &str) -> Result<(), EngineError> {
        if self.store.get_status(content_id).await?.is_some() {
            return Ok(());
        }

        let workflow = self
            .resolver
            .active_workflow(self.store.as_ref())
            .await?
            .ok_or_else(|| EngineError::Configuration("no active workflow is configured".into()))?;
        let initial = workflow.initial_stage().ok_or_else(|| {
            EngineError::Configuration(format!("workflow '{}' has no stages", workflow.name))
        })?;

        let now = Utc::now();
        let status = ContentStatus {
            id: Uuid::new_v4(),
            content_id,
            workflow_id: workflow.id,
            current_stage_id: initial.id,
            status: initial.status.clone(),
            updated_at: now,
        };

        // The bootstrap entry is only written the first time a content item
        // ever enters the workflow; re-attaching after deletion keeps the
        // existing trail.
        let bootstrap = if self.history.list_for_content(content_id).await?.is_empty() {
            Some(HistoryEntry {
                id: Uuid::new_v4(),
                content_id,
                from_status: initial.status.clone(),
                to_status: initial.status.clone(),
                action: ACTION_INITIAL_CREATION.to_string(),
                comment: None,
                actor_id: actor_id.to_string(),
                timestamp: now,
            })
        } else {
            None
        };

        let created = self.store.create_status(&status, bootstrap.as_ref()).await?;
        if created {
            if initial.status == self.draft_status {
                self.draft_cache.stamp(content_id, now);
            }
            tracing::info!(
                content_id = %content_id,
                workflow = %workflow.name,
                stage = %initial.name,
                "Content attached to workflow",
            );
        }
        Ok(())
    }

    /// The content item's current position, with the stage display name
    /// joined in. `None` when the item is not tracked.
    pub async fn get_status(
        &self,
        content_id: Uuid,
    ) -> Result<Option<ContentStatusView>, EngineError> {
        let Some(current) = self.store.get_status(content_id).await? else {
            return Ok(None);
        };
        let stage = self
            .store
            .find_stage(current.workflow_id, &current.status)
            .await?
            .ok_or_else(|| {
                EngineError::Configuration(format!(
                    "no stage bound to status '{}' in workflow {}",
                    current.status, current.workflow_id,
                ))
            })?;
        Ok(Some(ContentStatusView {
            content_id,
            status: current.status,
            stage_id: stage.id,
            stage_name: stage.name,
            updated_at: current.updated_at,
        }))
    }

    /// Remove the workflow state for a content item, typically when the
    /// host deletes the content. Idempotent. History is kept: the audit
    /// trail is the only reconstruction of what happened.
    pub async fn delete_status(&self, content_id: Uuid) -> Result<(), EngineError> {
        let removed = self.store.delete_status(content_id).await?;
        if removed > 0 {
            tracing::info!(content_id = %content_id, removed, "Workflow state removed");
        }
        Ok(())
    }

    /// Full audit history for a content item, oldest first.
    pub async fn history_for(&self, content_id: Uuid) -> Result<Vec<HistoryEntry>, EngineError> {
        Ok(self.history.list_for_content(content_id).await?)
    }
}
