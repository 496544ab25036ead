//! Port adapter tests: the store traits exercised against a real database.

use sqlx::PgPool;
use uuid::Uuid;

use copydesk_core::actions::ACTION_INITIAL_CREATION;
use copydesk_core::model::{ContentStatus, HistoryEntry, Workflow};
use copydesk_core::ports::{HistoryStore, WorkflowStore};
use copydesk_core::status::{StatusTag, STATUS_DRAFT, STATUS_EDITORIAL_REVIEW, STATUS_LEGAL_REVIEW};
use copydesk_db::{PgHistoryStore, PgWorkflowStore};

async fn seeded_workflow(pool: &PgPool) -> Workflow {
    copydesk_db::seed::install_default_workflow(pool).await.unwrap();
    let store = PgWorkflowStore::new(pool.clone());
    let mut workflows = store.list_workflows().await.unwrap();
    assert_eq!(workflows.len(), 1);
    workflows.remove(0)
}

fn initial_status(workflow: &Workflow, content_id: Uuid) -> ContentStatus {
    let initial = workflow.initial_stage().unwrap();
    ContentStatus {
        id: Uuid::new_v4(),
        content_id,
        workflow_id: workflow.id,
        current_stage_id: initial.id,
        status: initial.status.clone(),
        updated_at: chrono::Utc::now(),
    }
}

fn entry(content_id: Uuid, from: &StatusTag, to: &StatusTag, action: &str) -> HistoryEntry {
    HistoryEntry {
        id: Uuid::new_v4(),
        content_id,
        from_status: from.clone(),
        to_status: to.clone(),
        action: action.to_string(),
        comment: None,
        actor_id: "alice".to_string(),
        timestamp: chrono::Utc::now(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn workflow_loads_with_ordered_stages(pool: PgPool) {
    let workflow = seeded_workflow(&pool).await;

    assert!(workflow.is_active);
    assert_eq!(workflow.stages.len(), 5);
    let orders: Vec<_> = workflow.stages.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    assert_eq!(
        workflow.initial_stage().unwrap().status,
        StatusTag::from(STATUS_DRAFT),
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn create_status_is_idempotent(pool: PgPool) {
    let workflow = seeded_workflow(&pool).await;
    let store = PgWorkflowStore::new(pool.clone());
    let history = PgHistoryStore::new(pool.clone());
    let content_id = Uuid::new_v4();

    let status = initial_status(&workflow, content_id);
    let bootstrap = entry(content_id, &status.status, &status.status, ACTION_INITIAL_CREATION);

    assert!(store.create_status(&status, Some(&bootstrap)).await.unwrap());
    // A second insert must not write a row or another bootstrap entry.
    assert!(!store.create_status(&status, Some(&bootstrap)).await.unwrap());

    let loaded = store.get_status(content_id).await.unwrap().unwrap();
    assert_eq!(loaded.status, StatusTag::from(STATUS_DRAFT));

    let trail = history.list_for_content(content_id).await.unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, ACTION_INITIAL_CREATION);
}

#[sqlx::test(migrations = "./migrations")]
async fn guarded_commit_applies_once(pool: PgPool) {
    let workflow = seeded_workflow(&pool).await;
    let store = PgWorkflowStore::new(pool.clone());
    let history = PgHistoryStore::new(pool.clone());
    let content_id = Uuid::new_v4();

    let status = initial_status(&workflow, content_id);
    store.create_status(&status, None).await.unwrap();

    let draft = StatusTag::from(STATUS_DRAFT);
    let review = StatusTag::from(STATUS_EDITORIAL_REVIEW);
    let review_stage = store.find_stage(workflow.id, &review).await.unwrap().unwrap();

    let mut moved = status.clone();
    moved.status = review.clone();
    moved.current_stage_id = review_stage.id;
    moved.updated_at = chrono::Utc::now();

    let committed = store
        .commit_transition(&draft, &moved, &entry(content_id, &draft, &review, "Submit"))
        .await
        .unwrap();
    assert!(committed);

    // The same guard is now stale: the row left draft.
    let committed = store
        .commit_transition(&draft, &moved, &entry(content_id, &draft, &review, "Submit"))
        .await
        .unwrap();
    assert!(!committed);

    let loaded = store.get_status(content_id).await.unwrap().unwrap();
    assert_eq!(loaded.status, review);

    // The stale attempt must not have written a second entry.
    let trail = history.list_for_content(content_id).await.unwrap();
    assert_eq!(trail.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn transition_lookup_and_order(pool: PgPool) {
    let workflow = seeded_workflow(&pool).await;
    let store = PgWorkflowStore::new(pool.clone());

    let review = StatusTag::from(STATUS_EDITORIAL_REVIEW);
    let legal = StatusTag::from(STATUS_LEGAL_REVIEW);

    let from_review = store.list_transitions_from(workflow.id, &review).await.unwrap();
    // Forward to legal review plus the rejection back to draft, in
    // insertion order.
    assert_eq!(from_review.len(), 2);

    let found = store.find_transition(workflow.id, &review, &legal).await.unwrap();
    assert!(found.is_some());

    let missing = store
        .find_transition(workflow.id, &review, &StatusTag::from("archived"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_status_keeps_history(pool: PgPool) {
    let workflow = seeded_workflow(&pool).await;
    let store = PgWorkflowStore::new(pool.clone());
    let history = PgHistoryStore::new(pool.clone());
    let content_id = Uuid::new_v4();

    let status = initial_status(&workflow, content_id);
    let bootstrap = entry(content_id, &status.status, &status.status, ACTION_INITIAL_CREATION);
    store.create_status(&status, Some(&bootstrap)).await.unwrap();

    assert_eq!(store.delete_status(content_id).await.unwrap(), 1);
    assert_eq!(store.delete_status(content_id).await.unwrap(), 0);

    assert!(store.get_status(content_id).await.unwrap().is_none());
    assert_eq!(history.list_for_content(content_id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn history_reads_back_in_timestamp_order(pool: PgPool) {
    seeded_workflow(&pool).await;
    let history = PgHistoryStore::new(pool.clone());
    let content_id = Uuid::new_v4();

    let draft = StatusTag::from(STATUS_DRAFT);
    let review = StatusTag::from(STATUS_EDITORIAL_REVIEW);

    let mut first = entry(content_id, &draft, &review, "Submit");
    let mut second = entry(content_id, &review, &draft, "Reject");
    first.timestamp = chrono::Utc::now() - chrono::Duration::minutes(2);
    second.timestamp = chrono::Utc::now() - chrono::Duration::minutes(1);

    // Append newest first; the read side must still come back oldest
    // first.
    history.append(&second).await.unwrap();
    history.append(&first).await.unwrap();

    let trail = history.list_for_content(content_id).await.unwrap();
    let actions: Vec<_> = trail.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["Submit", "Reject"]);
}
