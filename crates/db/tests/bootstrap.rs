//! Bootstrap tests: migrate, seed, verify the schema invariants.

use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn migrate_seed_and_verify(pool: PgPool) {
    copydesk_db::health_check(&pool).await.unwrap();

    let installed = copydesk_db::seed::install_default_workflow(&pool).await.unwrap();
    assert!(installed);

    // Seeding again is a no-op.
    let installed = copydesk_db::seed::install_default_workflow(&pool).await.unwrap();
    assert!(!installed);

    let workflows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workflows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(workflows, 1);

    let stages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workflow_stages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stages, 5);

    let transitions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workflow_transitions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(transitions, 8);
}

#[sqlx::test(migrations = "./migrations")]
async fn stage_status_is_unique_per_workflow(pool: PgPool) {
    copydesk_db::seed::install_default_workflow(&pool).await.unwrap();

    let workflow_id: uuid::Uuid = sqlx::query_scalar("SELECT id FROM workflows")
        .fetch_one(&pool)
        .await
        .unwrap();

    // A second stage bound to an already-used status must violate the
    // uniqueness constraint.
    let result = sqlx::query(
        "INSERT INTO workflow_stages
            (id, workflow_id, status, stage_order, name, role_name)
         VALUES ($1, $2, 'draft', 99, 'Duplicate Draft', 'author')",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(workflow_id)
    .execute(&pool)
    .await;

    let error = result.unwrap_err();
    let db_error = error.as_database_error().expect("database error");
    assert_eq!(db_error.constraint(), Some("uq_workflow_stages_status"));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_workflow_cascades_to_stages_and_transitions(pool: PgPool) {
    copydesk_db::seed::install_default_workflow(&pool).await.unwrap();

    sqlx::query("DELETE FROM workflows").execute(&pool).await.unwrap();

    let stages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workflow_stages")
        .fetch_one(&pool)
        .await
        .unwrap();
    let transitions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workflow_transitions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stages, 0);
    assert_eq!(transitions, 0);
}
