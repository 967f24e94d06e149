//! State transition history tracking.
//!
//! Every applied transition can be recorded as an immutable value; the
//! history is an ordered list of those records.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
    /// Position of this transition in the machine's lifetime, starting at 1
    pub sequence: u64,
}

/// Ordered history of applied transitions.
///
/// `record` returns a new history with the transition added and leaves
/// the original untouched.
///
/// # Example
///
/// ```rust
/// use ufsm::core::{StateHistory, StateId, StateTransition};
/// use chrono::Utc;
///
/// let start = StateId::new("start").unwrap();
/// let middle = StateId::new("middle").unwrap();
/// let end = StateId::new("end").unwrap();
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: start.clone(),
///         to: middle.clone(),
///         timestamp: Utc::now(),
///         sequence: 1,
///     })
///     .record(StateTransition {
///         from: middle.clone(),
///         to: end.clone(),
///         timestamp: Utc::now(),
///         sequence: 2,
///     });
///
/// assert_eq!(history.get_path(), vec![&start, &middle, &end]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Record a transition in place, keeping at most `limit` records.
    ///
    /// The oldest records are dropped first.
    pub(crate) fn push_bounded(&mut self, transition: StateTransition, limit: Option<usize>) {
        self.transitions.push(transition);
        if let Some(limit) = limit {
            self.retain_last(limit);
        }
    }

    /// Drop the oldest records until at most `limit` remain.
    pub(crate) fn retain_last(&mut self, limit: usize) {
        let excess = self.transitions.len().saturating_sub(limit);
        if excess > 0 {
            self.transitions.drain(..excess);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of states traversed.
    ///
    /// The source of the first record, then the destination of each record.
    pub fn get_path(&self) -> Vec<&StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    /// Get all transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// Number of records kept.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether no transition is recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
