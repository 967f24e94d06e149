//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for declaring machines
//! up front, as an alternative to calling `map`/`on_entry`/`on_exit` on a
//! [`Machine`](crate::machine::Machine) directly.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, BuildErrors};
pub use machine::MachineBuilder;
pub use transition::{TransitionBuilder, TransitionDef};

use crate::core::IntoStateId;

/// Create a transition that accepts every input.
///
/// # Example
///
/// ```
/// use ufsm::builder::always;
///
/// let transition = always::<()>("start", "end").unwrap();
/// assert!(transition.accepts(&()));
/// ```
pub fn always<I>(
    from: impl IntoStateId,
    to: impl IntoStateId,
) -> Result<TransitionDef<I>, BuildError> {
    TransitionBuilder::new().from(from).to(to).always().build()
}

/// Create a transition guarded by a predicate.
///
/// # Example
///
/// ```
/// use ufsm::builder::guarded;
///
/// let transition = guarded("idle", "busy", |jobs: &usize| *jobs > 0).unwrap();
/// assert!(transition.accepts(&2));
/// assert!(!transition.accepts(&0));
/// ```
pub fn guarded<I, F>(
    from: impl IntoStateId,
    to: impl IntoStateId,
    predicate: F,
) -> Result<TransitionDef<I>, BuildError>
where
    F: Fn(&I) -> bool + Send + Sync + 'static,
{
    TransitionBuilder::new().from(from).to(to).when(predicate).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FsmError;

    #[test]
    fn always_builds() {
        let transition = always::<u8>("start", "middle").unwrap();

        assert_eq!(transition.from, "start");
        assert_eq!(transition.to, "middle");
        assert!(transition.accepts(&0));
    }

    #[test]
    fn guarded_respects_predicate() {
        let transition = guarded("start", "middle", |n: &i32| n.is_positive()).unwrap();

        assert!(transition.accepts(&1));
        assert!(!transition.accepts(&-1));
    }

    #[test]
    fn helpers_validate_states() {
        assert!(matches!(
            always::<u8>("", "middle"),
            Err(BuildError::Invalid(FsmError::InvalidState))
        ));
        assert!(matches!(
            guarded("start", false, |_: &u8| true),
            Err(BuildError::Invalid(FsmError::InvalidState))
        ));
    }
}
