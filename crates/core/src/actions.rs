//! Transition action names and their display priority.
//!
//! Candidate transitions are presented in a fixed order: rejection and
//! return-to-draft actions first, forward-progress actions by pipeline
//! depth, publishing last. Action names not in the table sort after all
//! recognized ones, keeping their relative store order.

use std::collections::HashSet;

use crate::model::Transition;

/// Action label recorded for the synthetic bootstrap entry written when a
/// content item is first attached to a workflow.
pub const ACTION_INITIAL_CREATION: &str = "Initial Creation";

/// Well-known action names used by the default seed.
pub const ACTION_SUBMIT_EDITORIAL: &str = "Submit for Editorial Review";
pub const ACTION_SEND_LEGAL: &str = "Send to Legal Review";
pub const ACTION_APPROVE: &str = "Approve for Publication";
pub const ACTION_PUBLISH: &str = "Publish";
pub const ACTION_REJECT: &str = "Reject";
/// Return-to-draft action on published content. Kept under its legacy seed
/// label; older deployments were seeded with Portuguese action names.
pub const ACTION_RETURN_TO_DRAFT: &str = "Voltar a Rascunho";

/// Display priority for a recognized action name, lower sorting first.
///
/// Matching is case-insensitive and includes the legacy Portuguese labels
/// still present in older seed data.
pub fn action_priority(name: &str) -> Option<u32> {
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "reject" | "rejeitar" => Some(0),
        "voltar a rascunho" | "return to draft" | "unpublish" => Some(1),
        "submit" | "submit for editorial review" | "submeter para revisão editorial" => Some(10),
        "send to legal" | "send to legal review" | "enviar para revisão jurídica" => Some(20),
        "approve" | "approve for publication" | "aprovar para publicação" => Some(30),
        "publish" | "publish content" | "publicar conteúdo" => Some(40),
        _ => None,
    }
}

/// Order candidate transitions for presentation and collapse them to at most
/// one per destination status.
///
/// The sort is stable, so unrecognized action names keep their relative
/// store order after all recognized ones, and the first transition per
/// destination after ordering wins. Callers therefore never see two ways to
/// reach the same next state.
pub fn order_candidates(mut transitions: Vec<Transition>) -> Vec<Transition> {
    transitions.sort_by_key(|t| action_priority(&t.action_name).unwrap_or(u32::MAX));

    let mut seen = HashSet::new();
    transitions.retain(|t| seen.insert(t.to_status.clone()));
    transitions
}
