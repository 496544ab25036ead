//! Workflow transition engine.
//!
//! Drives editorial content through a configured pipeline: candidate and
//! permission-filtered transition queries, atomic transition application
//! with its paired audit record, idempotent content bootstrap, and the
//! post-commit publish/unpublish and metrics side effects.
//!
//! Everything runs against the port traits in `copydesk-core`; the
//! [`memory`] module provides a complete in-memory backend for tests and
//! embedders without a durable store, and `copydesk-db` provides the
//! PostgreSQL backend.

mod draft_cache;
mod engine;
mod locks;
pub mod memory;
pub mod sinks;
mod tracker;

pub use draft_cache::DraftEntryCache;
pub use engine::{EngineConfig, TransitionEngine, TransitionRequest};
pub use tracker::StatusTracker;
