//! In-memory backend.
//!
//! A complete implementation of the store, history, permission and
//! publisher ports over process memory. Used by the engine's own tests and
//! by embedders that want the workflow semantics without a durable store.
//! One shared state mutex makes the paired status/history writes trivially
//! atomic.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use copydesk_core::error::StoreError;
use copydesk_core::model::{ContentStatus, HistoryEntry, Stage, Transition, Workflow};
use copydesk_core::ports::{ContentPublisher, HistoryStore, PermissionResolver, WorkflowStore};
use copydesk_core::roles::role_matches;
use copydesk_core::seed::WorkflowSeed;
use copydesk_core::status::StatusTag;

#[derive(Default)]
struct State {
    workflows: Vec<Workflow>,
    transitions: Vec<Transition>,
    statuses: Vec<ContentStatus>,
    history: Vec<HistoryEntry>,
}

/// Shared in-memory store implementing both [`WorkflowStore`] and
/// [`HistoryStore`].
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-loaded with one workflow configuration.
    pub fn with_seed(seed: WorkflowSeed) -> Self {
        let mut state = State::default();
        state.workflows.push(seed.workflow);
        state.transitions.extend(seed.transitions);
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Install an additional workflow configuration.
    pub async fn install(&self, seed: WorkflowSeed) {
        let mut state = self.state.lock().await;
        state.workflows.push(seed.workflow);
        state.transitions.extend(seed.transitions);
    }
}

#[async_trait]
impl WorkflowStore for InMemoryBackend {
    async fn get_status(&self, content_id: Uuid) -> Result<Option<ContentStatus>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.statuses.iter().find(|s| s.content_id == content_id).cloned())
    }

    async fn create_status(
        &self,
        status: &ContentStatus,
        initial_entry: Option<&HistoryEntry>,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        if state.statuses.iter().any(|s| s.content_id == status.content_id) {
            return Ok(false);
        }
        state.statuses.push(status.clone());
        if let Some(entry) = initial_entry {
            state.history.push(entry.clone());
        }
        Ok(true)
    }

    async fn commit_transition(
        &self,
        expected_from: &StatusTag,
        status: &ContentStatus,
        entry: &HistoryEntry,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        let Some(current) = state
            .statuses
            .iter_mut()
            .find(|s| s.content_id == status.content_id)
        else {
            return Ok(false);
        };
        if &current.status != expected_from {
            return Ok(false);
        }
        *current = status.clone();
        state.history.push(entry.clone());
        Ok(true)
    }

    async fn delete_status(&self, content_id: Uuid) -> Result<u64, StoreError> {
        let mut state = self.state.lock().await;
        let before = state.statuses.len();
        state.statuses.retain(|s| s.content_id != content_id);
        Ok((before - state.statuses.len()) as u64)
    }

    async fn list_workflows(&self) -> Result<Vec<Workflow>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.workflows.clone())
    }

    async fn find_stage(
        &self,
        workflow_id: Uuid,
        status: &StatusTag,
    ) -> Result<Option<Stage>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .workflows
            .iter()
            .find(|w| w.id == workflow_id)
            .and_then(|w| w.stage_for(status))
            .cloned())
    }

    async fn list_transitions_from(
        &self,
        workflow_id: Uuid,
        from: &StatusTag,
    ) -> Result<Vec<Transition>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .transitions
            .iter()
            .filter(|t| t.workflow_id == workflow_id && &t.from_status == from)
            .cloned()
            .collect())
    }

    async fn find_transition(
        &self,
        workflow_id: Uuid,
        from: &StatusTag,
        to: &StatusTag,
    ) -> Result<Option<Transition>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .transitions
            .iter()
            .find(|t| t.workflow_id == workflow_id && &t.from_status == from && &t.to_status == to)
            .cloned())
    }
}

#[async_trait]
impl HistoryStore for InMemoryBackend {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.history.push(entry.clone());
        Ok(())
    }

    async fn list_for_content(&self, content_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError> {
        let state = self.state.lock().await;
        let mut entries: Vec<_> = state
            .history
            .iter()
            .filter(|h| h.content_id == content_id)
            .cloned()
            .collect();
        entries.sort_by_key(|h| h.timestamp);
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Permission resolver
// ---------------------------------------------------------------------------

/// Permission resolver over a fixed actor-to-roles table.
#[derive(Clone, Default)]
pub struct StaticPermissionResolver {
    roles: HashMap<String, Vec<String>>,
}

impl StaticPermissionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `roles` to `actor_id`. Actors present in the table have
    /// general workflow access.
    pub fn with_actor(mut self, actor_id: &str, roles: &[&str]) -> Self {
        self.roles
            .insert(actor_id.to_string(), roles.iter().map(|r| r.to_string()).collect());
        self
    }
}

#[async_trait]
impl PermissionResolver for StaticPermissionResolver {
    async fn has_role(&self, actor_id: &str, role: &str) -> bool {
        self.roles
            .get(actor_id)
            .map(|roles| roles.iter().any(|r| role_matches(r, role)))
            .unwrap_or(false)
    }

    async fn has_general_access(&self, actor_id: &str) -> bool {
        self.roles.contains_key(actor_id)
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// Publisher that tracks the published flag in memory.
#[derive(Clone, Default)]
pub struct InMemoryPublisher {
    published: Arc<Mutex<HashSet<Uuid>>>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentPublisher for InMemoryPublisher {
    async fn is_published(&self, content_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.published.lock().await.contains(&content_id))
    }

    async fn set_published(&self, content_id: Uuid, published: bool) -> anyhow::Result<()> {
        let mut set = self.published.lock().await;
        if published {
            set.insert(content_id);
        } else {
            set.remove(&content_id);
        }
        Ok(())
    }
}
