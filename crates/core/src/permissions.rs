//! Workflow permission catalog and the transition permission predicate.
//!
//! Host systems that gate by claim rather than raw role membership can map
//! workflow roles and actions onto these permission names. The engine itself
//! only needs [`transition_permitted`].

use crate::roles::role_matches;

/// Base permission for accessing workflow features.
pub const PERM_WORKFLOW: &str = "workflow";

/// Permission to view workflow status and history.
pub const PERM_WORKFLOW_VIEW: &str = "workflow.view";

pub const PERM_WORKFLOW_AUTHOR: &str = "workflow.author";
pub const PERM_WORKFLOW_EDITOR: &str = "workflow.editor";
pub const PERM_WORKFLOW_LEGAL: &str = "workflow.legal";
pub const PERM_WORKFLOW_DIRECTOR: &str = "workflow.director";

pub const PERM_SUBMIT_FOR_REVIEW: &str = "workflow.submit-for-review";
pub const PERM_APPROVE_EDITORIAL: &str = "workflow.approve-editorial";
pub const PERM_REJECT_EDITORIAL: &str = "workflow.reject-editorial";
pub const PERM_SUBMIT_LEGAL: &str = "workflow.submit-legal";
pub const PERM_APPROVE_LEGAL: &str = "workflow.approve-legal";
pub const PERM_REJECT_LEGAL: &str = "workflow.reject-legal";
pub const PERM_PUBLISH: &str = "workflow.publish";
pub const PERM_UNPUBLISH: &str = "workflow.unpublish";

/// Map a workflow role name to its permission claim.
pub fn role_permission(role: &str) -> Option<&'static str> {
    match role.to_ascii_lowercase().as_str() {
        "author" | "autor" => Some(PERM_WORKFLOW_AUTHOR),
        "editor" => Some(PERM_WORKFLOW_EDITOR),
        "legal" | "jurista" => Some(PERM_WORKFLOW_LEGAL),
        "director" | "diretor" => Some(PERM_WORKFLOW_DIRECTOR),
        _ => None,
    }
}

/// Map a workflow action key to its permission claim.
pub fn action_permission(action: &str) -> Option<&'static str> {
    match action.to_ascii_lowercase().as_str() {
        "submit_for_review" => Some(PERM_SUBMIT_FOR_REVIEW),
        "approve_editorial" => Some(PERM_APPROVE_EDITORIAL),
        "reject_editorial" => Some(PERM_REJECT_EDITORIAL),
        "submit_legal" => Some(PERM_SUBMIT_LEGAL),
        "approve_legal" => Some(PERM_APPROVE_LEGAL),
        "reject_legal" => Some(PERM_REJECT_LEGAL),
        "publish" => Some(PERM_PUBLISH),
        "unpublish" => Some(PERM_UNPUBLISH),
        _ => None,
    }
}

/// All workflow permission names.
pub fn all() -> &'static [&'static str] {
    &[
        PERM_WORKFLOW,
        PERM_WORKFLOW_VIEW,
        PERM_WORKFLOW_AUTHOR,
        PERM_WORKFLOW_EDITOR,
        PERM_WORKFLOW_LEGAL,
        PERM_WORKFLOW_DIRECTOR,
        PERM_SUBMIT_FOR_REVIEW,
        PERM_APPROVE_EDITORIAL,
        PERM_REJECT_EDITORIAL,
        PERM_SUBMIT_LEGAL,
        PERM_APPROVE_LEGAL,
        PERM_REJECT_LEGAL,
        PERM_PUBLISH,
        PERM_UNPUBLISH,
    ]
}

/// Whether an actor holding `actor_roles` may execute a transition gated by
/// `required_role`.
///
/// An empty `required_role` admits any actor with general workflow access.
/// Role comparison is case-insensitive; holding any override role admits the
/// actor regardless of the required role.
pub fn transition_permitted<S: AsRef<str>>(
    required_role: &str,
    actor_roles: &[S],
    override_roles: &[String],
) -> bool {
    if required_role.is_empty() {
        return true;
    }
    actor_roles.iter().any(|role| {
        role_matches(role.as_ref(), required_role)
            || override_roles.iter().any(|o| role_matches(role.as_ref(), o))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::default_override_roles;

    #[test]
    fn empty_required_role_admits_anyone() {
        assert!(transition_permitted::<&str>("", &[], &[]));
        assert!(transition_permitted("", &["author"], &default_override_roles()));
    }

    #[test]
    fn matching_role_is_case_insensitive() {
        assert!(transition_permitted("editor", &["Editor"], &[]));
        assert!(!transition_permitted("editor", &["Author"], &[]));
    }

    #[test]
    fn override_role_bypasses_requirement() {
        let overrides = default_override_roles();
        assert!(transition_permitted("editor", &["SysAdmin"], &overrides));
        assert!(transition_permitted("editor", &["director"], &overrides));
        assert!(!transition_permitted("editor", &["author"], &overrides));
    }

    #[test]
    fn role_permissions_cover_legacy_names() {
        assert_eq!(role_permission("Autor"), Some(PERM_WORKFLOW_AUTHOR));
        assert_eq!(role_permission("jurista"), Some(PERM_WORKFLOW_LEGAL));
        assert_eq!(role_permission("unknown"), None);
    }

    #[test]
    fn catalog_lists_every_permission_once() {
        let all = all();
        let mut dedup = all.to_vec();
        dedup.sort();
        dedup.dedup();
        assert_eq!(all.len(), dedup.len());
    }
}
