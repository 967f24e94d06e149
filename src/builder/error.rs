//! Build errors for machine and transition builders.

use crate::core::FsmError;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error(transparent)]
    Invalid(#[from] FsmError),
}

/// Every problem found while building a machine.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{} problem(s) building state machine: {}", .0.len(), describe(.0))]
pub struct BuildErrors(pub Vec<BuildError>);

impl BuildErrors {
    /// Every problem found, in declaration order.
    pub fn errors(&self) -> &[BuildError] {
        &self.0
    }
}

fn describe(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
