//! Installs the default workflow configuration.

use sqlx::PgPool;

use copydesk_core::seed::default_workflow;

use crate::repositories::{TransitionRepo, WorkflowRepo};

/// Install the default editorial workflow if no workflow is configured yet.
///
/// Returns `true` when the seed was installed. Safe to call on every
/// startup.
pub async fn install_default_workflow(pool: &PgPool) -> Result<bool, sqlx::Error> {
    if WorkflowRepo::count(pool).await? > 0 {
        return Ok(false);
    }

    let seed = default_workflow();
    let name = seed.workflow.name.clone();

    WorkflowRepo::insert(pool, &seed.workflow).await?;
    for transition in &seed.transitions {
        TransitionRepo::insert(pool, transition).await?;
    }

    tracing::info!(workflow = %name, "Default workflow installed");
    Ok(true)
}
