//! Errors raised by the transition engine.

use super::state::StateId;
use thiserror::Error;

/// Errors that can occur when registering or performing transitions.
///
/// Every error is returned before any mutation takes place, so a failed
/// call always leaves the machine exactly as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    /// A state identifier was empty (or otherwise falsy).
    #[error("Must provide valid state")]
    InvalidState,

    /// A transition was declared without a one-input predicate.
    #[error("A predicate with an arity of 1 is required")]
    InvalidPredicate,

    /// No predicate mapped from the current state accepted the input.
    #[error("Cannot transition as no valid candidates are available from [{from}]")]
    NoValidTransition { from: StateId },

    /// More than one predicate mapped from the current state accepted the input.
    #[error(
        "Cannot transition as more than one valid candidate is available from [{from}]: {}",
        format_candidates(.candidates)
    )]
    AmbiguousTransition {
        from: StateId,
        candidates: Vec<StateId>,
    },
}

fn format_candidates(candidates: &[StateId]) -> String {
    candidates
        .iter()
        .map(|c| format!("[{c}]"))
        .collect::<Vec<_>>()
        .join(", ")
}
