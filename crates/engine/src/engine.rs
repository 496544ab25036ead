//! The transition engine.
//!
//! Candidate listing, permission filtering and atomic transition
//! application. The legality check always runs against committed state
//! under the per-content critical section, so a caller working from a stale
//! candidate list gets a clean rejection instead of a corrupt transition.

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use copydesk_core::actions::order_candidates;
use copydesk_core::error::{
    AppliedTransition, EngineError, RejectReason, StoreError, TransitionOutcome,
};
use copydesk_core::metric_names::{
    METRIC_REJECTIONS_TOTAL, METRIC_TIME_TO_PUBLISH_SECONDS, METRIC_TRANSITIONS_TOTAL,
    METRIC_TRANSITION_DURATION_SECONDS, SPAN_APPLY_TRANSITION, SPAN_LIST_TRANSITIONS,
};
use copydesk_core::model::{ContentStatus, HistoryEntry, Stage, Transition};
use copydesk_core::permissions::transition_permitted;
use copydesk_core::ports::{ContentPublisher, MetricsSink, PermissionResolver, WorkflowStore};
use copydesk_core::roles::{default_override_roles, is_review_role};
use copydesk_core::status::{StatusTag, STATUS_DRAFT, STATUS_PUBLISHED};
use copydesk_core::types::Timestamp;

use crate::draft_cache::DraftEntryCache;
use crate::locks::ContentLocks;

/// How often a commit may lose the optimistic guard to an external writer
/// before the operation gives up.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Engine configuration.
///
/// The draft and published tags identify the two statuses with publish
/// side effects; deployments seeding a different tag set override them.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub draft_status: StatusTag,
    pub published_status: StatusTag,
    /// Roles that may execute any transition regardless of its required
    /// role.
    pub override_roles: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            draft_status: StatusTag::from(STATUS_DRAFT),
            published_status: StatusTag::from(STATUS_PUBLISHED),
            override_roles: default_override_roles(),
        }
    }
}

/// One transition request.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub content_id: Uuid,
    pub to_status: StatusTag,
    pub actor_id: String,
    /// When supplied, the engine re-checks the transition's required role
    /// itself. Leave `None` only when the boundary layer already enforced
    /// permissions.
    pub actor_roles: Option<Vec<String>>,
    pub comment: Option<String>,
}

/// Validates and applies workflow transitions.
pub struct TransitionEngine {
    store: Arc<dyn WorkflowStore>,
    permissions: Arc<dyn PermissionResolver>,
    publisher: Arc<dyn ContentPublisher>,
    metrics: Arc<dyn MetricsSink>,
    config: EngineConfig,
    locks: ContentLocks,
    draft_cache: Arc<DraftEntryCache>,
}

impl TransitionEngine {
    pub fn new(
        store: Arc<dyn WorkflowStore>,
        permissions: Arc<dyn PermissionResolver>,
        publisher: Arc<dyn ContentPublisher>,
        metrics: Arc<dyn MetricsSink>,
        draft_cache: Arc<DraftEntryCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            permissions,
            publisher,
            metrics,
            config,
            locks: ContentLocks::default(),
            draft_cache,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All transitions leaving the content item's current status, ordered
    /// for presentation and collapsed to one per destination. Empty when
    /// the item is not tracked.
    pub async fn list_candidate_transitions(
        &self,
        content_id: Uuid,
    ) -> Result<Vec<Transition>, EngineError> {
        let span = self.metrics.start_span(SPAN_LIST_TRANSITIONS);
        async {
            let Some(current) = self.store.get_status(content_id).await? else {
                return Ok(Vec::new());
            };
            let transitions = self
                .store
                .list_transitions_from(current.workflow_id, &current.status)
                .await?;
            Ok(order_candidates(transitions))
        }
        .instrument(span)
        .await
    }

    /// The candidate list filtered by an already-resolved role set.
    pub async fn list_permitted_transitions(
        &self,
        content_id: Uuid,
        actor_roles: &[String],
    ) -> Result<Vec<Transition>, EngineError> {
        let candidates = self.list_candidate_transitions(content_id).await?;
        Ok(candidates
            .into_iter()
            .filter(|t| {
                transition_permitted(&t.required_role, actor_roles, &self.config.override_roles)
            })
            .collect())
    }

    /// The candidate list filtered through the permission resolver.
    ///
    /// Filters the same candidate list as the role-set variant; the only
    /// difference is that role membership is asked of the resolver.
    pub async fn list_permitted_for_actor(
        &self,
        content_id: Uuid,
        actor_id: &str,
    ) -> Result<Vec<Transition>, EngineError> {
        let candidates = self.list_candidate_transitions(content_id).await?;
        if candidates.is_empty() || !self.permissions.has_general_access(actor_id).await {
            return Ok(Vec::new());
        }

        let mut has_override = false;
        for role in &self.config.override_roles {
            if self.permissions.has_role(actor_id, role).await {
                has_override = true;
                break;
            }
        }

        let mut permitted = Vec::new();
        for transition in candidates {
            if transition.required_role.is_empty()
                || has_override
                || self.permissions.has_role(actor_id, &transition.required_role).await
            {
                permitted.push(transition);
            }
        }
        Ok(permitted)
    }

    // -----------------------------------------------------------------------
    // Application
    // -----------------------------------------------------------------------

    /// Apply one transition.
    ///
    /// Business-rule failures come back as [`TransitionOutcome::Rejected`]
    /// or [`TransitionOutcome::Forbidden`]; only configuration defects and
    /// backend faults are `Err`. On success the status mutation and its
    /// history entry are already committed; publish/unpublish and metrics
    /// side effects are best-effort and never roll the transition back.
    pub async fn apply_transition(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionOutcome, EngineError> {
        let span = self.metrics.start_span(SPAN_APPLY_TRANSITION);
        self.apply_inner(request).instrument(span).await
    }

    async fn apply_inner(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionOutcome, EngineError> {
        let _guard = self.locks.acquire(request.content_id).await;

        let mut attempts = 0;
        let (previous, transition, origin, destination, elapsed_seconds, now) = loop {
            attempts += 1;

            let Some(current) = self.store.get_status(request.content_id).await? else {
                return Ok(TransitionOutcome::Rejected(RejectReason::NotTracked));
            };

            // Authoritative legality check, always against committed state.
            let Some(transition) = self
                .store
                .find_transition(current.workflow_id, &current.status, &request.to_status)
                .await?
            else {
                return Ok(TransitionOutcome::Rejected(RejectReason::InvalidTransition {
                    from: current.status,
                    to: request.to_status,
                }));
            };

            if let Some(roles) = &request.actor_roles {
                if !transition_permitted(
                    &transition.required_role,
                    roles,
                    &self.config.override_roles,
                ) {
                    return Ok(TransitionOutcome::Forbidden {
                        required_role: transition.required_role,
                    });
                }
            }

            let origin = self.resolve_stage(current.workflow_id, &current.status).await?;
            let destination = self.resolve_stage(current.workflow_id, &request.to_status).await?;

            let now = Utc::now();
            let elapsed_seconds = (now - current.updated_at)
                .to_std()
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);

            let next = ContentStatus {
                current_stage_id: destination.id,
                status: request.to_status.clone(),
                updated_at: now,
                ..current.clone()
            };
            let entry = HistoryEntry {
                id: Uuid::new_v4(),
                content_id: request.content_id,
                from_status: current.status.clone(),
                to_status: request.to_status.clone(),
                action: transition.action_name.clone(),
                comment: request.comment.clone(),
                actor_id: request.actor_id.clone(),
                timestamp: now,
            };

            if self
                .store
                .commit_transition(&current.status, &next, &entry)
                .await?
            {
                break (current.status, transition, origin, destination, elapsed_seconds, now);
            }

            // An external writer moved the row; re-validate from committed
            // state.
            if attempts >= MAX_COMMIT_ATTEMPTS {
                return Err(EngineError::Store(StoreError::Conflict));
            }
            tracing::debug!(
                content_id = %request.content_id,
                attempts,
                "Transition commit lost an update race, re-validating",
            );
        };

        tracing::info!(
            content_id = %request.content_id,
            from = %previous,
            to = %destination.status,
            action = %transition.action_name,
            actor = %request.actor_id,
            "Workflow transition applied",
        );

        self.run_side_effects(request.content_id, &origin, &destination, elapsed_seconds, now)
            .await;

        Ok(TransitionOutcome::Applied(AppliedTransition {
            content_id: request.content_id,
            from_status: previous,
            to_status: destination.status,
            action: transition.action_name,
        }))
    }

    async fn resolve_stage(
        &self,
        workflow_id: Uuid,
        status: &StatusTag,
    ) -> Result<Stage, EngineError> {
        self.store.find_stage(workflow_id, status).await?.ok_or_else(|| {
            EngineError::Configuration(format!(
                "no stage bound to status '{status}' in workflow {workflow_id}",
            ))
        })
    }

    /// Post-commit side effects. Failures are logged and never propagated:
    /// the state transition already committed.
    async fn run_side_effects(
        &self,
        content_id: Uuid,
        origin: &Stage,
        destination: &Stage,
        elapsed_seconds: f64,
        now: Timestamp,
    ) {
        if destination.status == self.config.published_status {
            self.publish(content_id, now).await;
        }

        if destination.status == self.config.draft_status {
            self.unpublish(content_id).await;
            self.draft_cache.stamp(content_id, now);
            if is_review_role(&origin.role_name) {
                self.metrics.increment_counter(
                    METRIC_REJECTIONS_TOTAL,
                    &[("role", origin.role_name.clone())],
                );
            }
        }

        self.metrics.increment_counter(
            METRIC_TRANSITIONS_TOTAL,
            &[("transition", format!("{}→{}", origin.name, destination.name))],
        );
        self.metrics.record_duration(
            METRIC_TRANSITION_DURATION_SECONDS,
            elapsed_seconds,
            &[("from", origin.name.clone()), ("to", destination.name.clone())],
        );
    }

    async fn publish(&self, content_id: Uuid, now: Timestamp) {
        match self.publisher.is_published(content_id).await {
            Ok(true) => {}
            Ok(false) => {
                if let Err(error) = self.publisher.set_published(content_id, true).await {
                    tracing::warn!(content_id = %content_id, error = %error, "Publish call failed");
                } else if let Some(entered_draft) = self.draft_cache.take(content_id) {
                    let seconds = (now - entered_draft)
                        .to_std()
                        .map(|d| d.as_secs_f64())
                        .unwrap_or(0.0);
                    self.metrics
                        .record_duration(METRIC_TIME_TO_PUBLISH_SECONDS, seconds, &[]);
                }
            }
            Err(error) => {
                tracing::warn!(content_id = %content_id, error = %error, "Published-flag lookup failed");
            }
        }
    }

    async fn unpublish(&self, content_id: Uuid) {
        match self.publisher.is_published(content_id).await {
            Ok(true) => {
                if let Err(error) = self.publisher.set_published(content_id, false).await {
                    tracing::warn!(content_id = %content_id, error = %error, "Unpublish call failed");
                }
            }
            Ok(false) => {}
            Err(error) => {
                tracing::warn!(content_id = %content_id, error = %error, "Published-flag lookup failed");
            }
        }
    }
}
