//! Repositories for the `workflows`, `workflow_stages` and
//! `workflow_transitions` tables.

use sqlx::PgPool;
use uuid::Uuid;

use copydesk_core::model::{Transition, Workflow};

use crate::models::workflow::{StageRow, TransitionRow, WorkflowRow};

/// Column list for workflows queries.
const WORKFLOW_COLUMNS: &str = "id, name, is_active, created_at, updated_at";

/// Column list for workflow_stages queries.
const STAGE_COLUMNS: &str =
    "id, workflow_id, status, stage_order, name, role_name, instructions";

/// Column list for workflow_transitions queries (excludes the internal
/// `seq` ordering column).
const TRANSITION_COLUMNS: &str =
    "id, workflow_id, from_status, to_status, action_name, required_role";

/// Provides operations on workflow configurations.
pub struct WorkflowRepo;

impl WorkflowRepo {
    /// Insert a workflow and its stages in one transaction.
    pub async fn insert(pool: &PgPool, workflow: &Workflow) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO workflows (id, name, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(workflow.id)
        .bind(&workflow.name)
        .bind(workflow.is_active)
        .bind(workflow.created_at)
        .bind(workflow.updated_at)
        .execute(&mut *tx)
        .await?;

        for stage in &workflow.stages {
            sqlx::query(
                "INSERT INTO workflow_stages
                    (id, workflow_id, status, stage_order, name, role_name, instructions)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(stage.id)
            .bind(stage.workflow_id)
            .bind(stage.status.as_str())
            .bind(stage.order)
            .bind(&stage.name)
            .bind(&stage.role_name)
            .bind(&stage.instructions)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// All workflows with their stages loaded, ordered by creation time.
    pub async fn list_with_stages(pool: &PgPool) -> Result<Vec<Workflow>, sqlx::Error> {
        let query = format!("SELECT {WORKFLOW_COLUMNS} FROM workflows ORDER BY created_at");
        let workflows = sqlx::query_as::<_, WorkflowRow>(&query).fetch_all(pool).await?;

        let query = format!(
            "SELECT {STAGE_COLUMNS} FROM workflow_stages ORDER BY workflow_id, stage_order"
        );
        let stages = sqlx::query_as::<_, StageRow>(&query).fetch_all(pool).await?;

        Ok(workflows
            .into_iter()
            .map(|row| {
                let own = stages
                    .iter()
                    .filter(|s| s.workflow_id == row.id)
                    .cloned()
                    .collect();
                row.into_workflow(own)
            })
            .collect())
    }

    /// Find the stage bound to `status` within a workflow.
    pub async fn find_stage(
        pool: &PgPool,
        workflow_id: Uuid,
        status: &str,
    ) -> Result<Option<StageRow>, sqlx::Error> {
        let query = format!(
            "SELECT {STAGE_COLUMNS} FROM workflow_stages
             WHERE workflow_id = $1 AND status = $2"
        );
        sqlx::query_as::<_, StageRow>(&query)
            .bind(workflow_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Count configured workflows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workflows")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

/// Provides operations on workflow transitions.
pub struct TransitionRepo;

impl TransitionRepo {
    /// Insert a transition.
    pub async fn insert(pool: &PgPool, transition: &Transition) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO workflow_transitions
                (id, workflow_id, from_status, to_status, action_name, required_role)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(transition.id)
        .bind(transition.workflow_id)
        .bind(transition.from_status.as_str())
        .bind(transition.to_status.as_str())
        .bind(&transition.action_name)
        .bind(&transition.required_role)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All transitions leaving `from` within a workflow, in insertion order.
    pub async fn list_from(
        pool: &PgPool,
        workflow_id: Uuid,
        from: &str,
    ) -> Result<Vec<TransitionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSITION_COLUMNS} FROM workflow_transitions
             WHERE workflow_id = $1 AND from_status = $2
             ORDER BY seq"
        );
        sqlx::query_as::<_, TransitionRow>(&query)
            .bind(workflow_id)
            .bind(from)
            .fetch_all(pool)
            .await
    }

    /// The first transition between `from` and `to` within a workflow.
    pub async fn find(
        pool: &PgPool,
        workflow_id: Uuid,
        from: &str,
        to: &str,
    ) -> Result<Option<TransitionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSITION_COLUMNS} FROM workflow_transitions
             WHERE workflow_id = $1 AND from_status = $2 AND to_status = $3
             ORDER BY seq
             LIMIT 1"
        );
        sqlx::query_as::<_, TransitionRow>(&query)
            .bind(workflow_id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }
}
