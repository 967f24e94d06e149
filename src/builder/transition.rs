//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::{FsmError, IntoStateId, Predicate, StateId};

/// A validated transition declaration, ready to be mapped into a machine.
pub struct TransitionDef<I> {
    pub from: StateId,
    pub to: StateId,
    pub predicate: Predicate<I>,
}

impl<I> TransitionDef<I> {
    /// Whether this transition accepts `input` (pure).
    pub fn accepts(&self, input: &I) -> bool {
        self.predicate.check(input)
    }
}

impl<I> Clone for TransitionDef<I> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<I> std::fmt::Debug for TransitionDef<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionDef")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Builder for transitions with a fluent API.
///
/// States are validated when [`build`](TransitionBuilder::build) is called.
pub struct TransitionBuilder<I> {
    from: Option<Result<StateId, FsmError>>,
    to: Option<Result<StateId, FsmError>>,
    predicate: Option<Predicate<I>>,
}

impl<I> TransitionBuilder<I> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            predicate: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl IntoStateId) -> Self {
        self.from = Some(state.into_state_id());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl IntoStateId) -> Self {
        self.to = Some(state.into_state_id());
        self
    }

    /// Guard the transition with a closure (required, or use `always`).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Predicate::new(predicate));
        self
    }

    /// Guard the transition with an existing predicate.
    pub fn predicate(mut self, predicate: Predicate<I>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Accept every input.
    pub fn always(mut self) -> Self {
        self.predicate = Some(Predicate::always());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionDef<I>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)??;
        let to = self.to.ok_or(BuildError::MissingToState)??;
        let predicate = self.predicate.ok_or(FsmError::InvalidPredicate)?;

        Ok(TransitionDef {
            from,
            to,
            predicate,
        })
    }
}

impl<I> Default for TransitionBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<u8>::new().from("initial").build();
        assert!(matches!(result, Err(BuildError::MissingToState)));

        let result = TransitionBuilder::<u8>::new().to("next").build();
        assert!(matches!(result, Err(BuildError::MissingFromState)));
    }

    #[test]
    fn missing_predicate_is_an_invalid_predicate() {
        let result = TransitionBuilder::<u8>::new()
            .from("initial")
            .to("next")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Invalid(FsmError::InvalidPredicate))
        ));
    }

    #[test]
    fn falsy_states_are_invalid() {
        let result = TransitionBuilder::<u8>::new()
            .from("")
            .to("next")
            .always()
            .build();
        assert!(matches!(result, Err(BuildError::Invalid(FsmError::InvalidState))));

        let result = TransitionBuilder::<u8>::new()
            .from("initial")
            .to(0u8)
            .always()
            .build();
        assert!(matches!(result, Err(BuildError::Invalid(FsmError::InvalidState))));
    }

    #[test]
    fn transition_builder_with_predicate() {
        let transition = TransitionBuilder::new()
            .from("idle")
            .to("busy")
            .when(|jobs: &usize| *jobs > 0)
            .build()
            .unwrap();

        assert_eq!(transition.from, "idle");
        assert_eq!(transition.to, "busy");
        assert!(transition.accepts(&3));
        assert!(!transition.accepts(&0));
    }

    #[test]
    fn always_accepts_any_input() {
        let transition = TransitionBuilder::<i32>::new()
            .from("a")
            .to("b")
            .always()
            .build()
            .unwrap();

        assert!(transition.accepts(&-1));
    }
}
