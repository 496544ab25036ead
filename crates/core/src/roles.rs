//! Well-known role name constants.
//!
//! These must match the `role_name` values seeded into the workflow stage
//! and transition tables. Role comparison is case-insensitive everywhere so
//! identity providers that report `Editor` or `EDITOR` resolve the same.

pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_LEGAL: &str = "legal";
pub const ROLE_DIRECTOR: &str = "director";
pub const ROLE_SYSADMIN: &str = "sysadmin";

/// Roles that operate review stages. A transition that sends content back
/// to draft from a stage operated by one of these counts as a rejection.
pub const REVIEW_ROLES: &[&str] = &[ROLE_EDITOR, ROLE_LEGAL];

/// Case-insensitive role name comparison.
pub fn role_matches(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Whether `role` operates a review stage (editorial or legal).
pub fn is_review_role(role: &str) -> bool {
    REVIEW_ROLES.iter().any(|r| role_matches(r, role))
}

/// Roles that may execute any transition regardless of its required role.
pub fn default_override_roles() -> Vec<String> {
    vec![ROLE_SYSADMIN.to_string(), ROLE_DIRECTOR.to_string()]
}
