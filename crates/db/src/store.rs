//! Port adapters: the `copydesk-core` store traits over PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use copydesk_core::error::StoreError;
use copydesk_core::model::{ContentStatus, HistoryEntry, Stage, Transition, Workflow};
use copydesk_core::ports::{HistoryStore, WorkflowStore};
use copydesk_core::status::StatusTag;

use crate::repositories::{ContentStatusRepo, HistoryRepo, TransitionRepo, WorkflowRepo};

fn backend(error: sqlx::Error) -> StoreError {
    StoreError::Backend(error.into())
}

/// [`WorkflowStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgWorkflowStore {
    pool: PgPool,
}

impl PgWorkflowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowStore for PgWorkflowStore {
    async fn get_status(&self, content_id: Uuid) -> Result<Option<ContentStatus>, StoreError> {
        let row = ContentStatusRepo::find_by_content(&self.pool, content_id)
            .await
            .map_err(backend)?;
        Ok(row.map(ContentStatus::from))
    }

    async fn create_status(
        &self,
        status: &ContentStatus,
        initial_entry: Option<&HistoryEntry>,
    ) -> Result<bool, StoreError> {
        ContentStatusRepo::insert_if_absent(&self.pool, status, initial_entry)
            .await
            .map_err(backend)
    }

    async fn commit_transition(
        &self,
        expected_from: &StatusTag,
        status: &ContentStatus,
        entry: &HistoryEntry,
    ) -> Result<bool, StoreError> {
        ContentStatusRepo::update_guarded(&self.pool, expected_from.as_str(), status, entry)
            .await
            .map_err(backend)
    }

    async fn delete_status(&self, content_id: Uuid) -> Result<u64, StoreError> {
        ContentStatusRepo::delete_by_content(&self.pool, content_id)
            .await
            .map_err(backend)
    }

    async fn list_workflows(&self) -> Result<Vec<Workflow>, StoreError> {
        WorkflowRepo::list_with_stages(&self.pool).await.map_err(backend)
    }

    async fn find_stage(
        &self,
        workflow_id: Uuid,
        status: &StatusTag,
    ) -> Result<Option<Stage>, StoreError> {
        let row = WorkflowRepo::find_stage(&self.pool, workflow_id, status.as_str())
            .await
            .map_err(backend)?;
        Ok(row.map(Stage::from))
    }

    async fn list_transitions_from(
        &self,
        workflow_id: Uuid,
        from: &StatusTag,
    ) -> Result<Vec<Transition>, StoreError> {
        let rows = TransitionRepo::list_from(&self.pool, workflow_id, from.as_str())
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Transition::from).collect())
    }

    async fn find_transition(
        &self,
        workflow_id: Uuid,
        from: &StatusTag,
        to: &StatusTag,
    ) -> Result<Option<Transition>, StoreError> {
        let row = TransitionRepo::find(&self.pool, workflow_id, from.as_str(), to.as_str())
            .await
            .map_err(backend)?;
        Ok(row.map(Transition::from))
    }
}

/// [`HistoryStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        HistoryRepo::insert(&self.pool, entry).await.map_err(backend)
    }

    async fn list_for_content(&self, content_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError> {
        let rows = HistoryRepo::list_by_content(&self.pool, content_id)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
