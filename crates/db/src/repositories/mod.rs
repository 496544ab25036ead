//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or an executor, where a call must join a
//! transaction) as the first argument.

pub mod content_status_repo;
pub mod history_repo;
pub mod workflow_repo;

pub use content_status_repo::ContentStatusRepo;
pub use history_repo::HistoryRepo;
pub use workflow_repo::{TransitionRepo, WorkflowRepo};
