//! PostgreSQL backend for the copydesk workflow engine.
//!
//! Row models, repositories and the port adapters (`PgWorkflowStore`,
//! `PgHistoryStore`) the engine runs against, plus the seeder that installs
//! the default workflow.

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

pub use store::{PgHistoryStore, PgWorkflowStore};

/// Verify database connectivity.
pub async fn health_check(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
