//! Editorial status tags.
//!
//! Statuses are string-backed rather than a closed Rust enum: the set of
//! statuses a deployment uses is seed data, resolved against the stage and
//! transition tables at runtime. Deployments that want a single generic
//! `rejected` status instead of per-role rejection tags just seed a
//! different set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known status tags used by the default seed. These must match the
/// values stored in the `workflow_stages.status` and
/// `workflow_transitions.from_status` / `to_status` columns.
pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_EDITORIAL_REVIEW: &str = "editorial_review";
pub const STATUS_LEGAL_REVIEW: &str = "legal_review";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_PUBLISHED: &str = "published";

/// A workflow status key.
///
/// The tag is the only legal transition key: stage lookup, transition lookup
/// and content state are all keyed by it. Comparison is exact (tags are
/// machine identifiers, not display names).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusTag(String);

impl StatusTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatusTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for StatusTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_equality_is_exact() {
        assert_eq!(StatusTag::from(STATUS_DRAFT), StatusTag::new("draft"));
        assert_ne!(StatusTag::new("Draft"), StatusTag::new("draft"));
    }

    #[test]
    fn tag_serializes_transparently() {
        let json = serde_json::to_string(&StatusTag::from(STATUS_PUBLISHED)).unwrap();
        assert_eq!(json, "\"published\"");
    }
}
