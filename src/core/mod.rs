//! Core state machine types.
//!
//! This module contains the pure building blocks of the engine:
//! - Validated state identifiers
//! - One-input transition predicates
//! - Immutable history tracking
//! - The engine's error taxonomy

mod error;
mod history;
mod predicate;
mod state;

pub use error::FsmError;
pub use history::{StateHistory, StateTransition};
pub use predicate::Predicate;
pub use state::{IntoStateId, StateId};
