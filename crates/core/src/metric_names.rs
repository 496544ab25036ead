//! Canonical metric and span names emitted by the transition engine.

/// Counter of applied transitions, labeled `transition` with the
/// `FromStage→ToStage` display names.
pub const METRIC_TRANSITIONS_TOTAL: &str = "workflow_transitions_total";

/// Histogram of time spent in the origin stage, labeled `from` / `to`.
pub const METRIC_TRANSITION_DURATION_SECONDS: &str = "workflow_transition_duration_seconds";

/// Histogram of time from last entering draft until first publication.
pub const METRIC_TIME_TO_PUBLISH_SECONDS: &str = "workflow_time_to_publish_seconds";

/// Counter of review rejections (content returned to draft from a review
/// stage), labeled `role` with the reviewing stage's role.
pub const METRIC_REJECTIONS_TOTAL: &str = "workflow_rejections_total";

/// Span names for the engine's operations.
pub const SPAN_APPLY_TRANSITION: &str = "workflow.apply_transition";
pub const SPAN_LIST_TRANSITIONS: &str = "workflow.list_transitions";
pub const SPAN_ENSURE_STATUS: &str = "workflow.ensure_status";
