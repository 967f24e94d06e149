//! Transition predicates.
//!
//! A predicate decides whether a transition is valid for a given input,
//! assuming the machine sits in the transition's source state. Taking
//! exactly one input is part of the predicate's type.

use std::fmt;
use std::sync::Arc;

/// Pure one-input predicate guarding a transition.
///
/// Predicates are evaluated during resolution, possibly several per call,
/// so they must not change the outcome of other predicates.
///
/// # Example
///
/// ```rust
/// use ufsm::core::Predicate;
///
/// let is_coin = Predicate::new(|input: &&str| *input == "coin");
///
/// assert!(is_coin.check(&"coin"));
/// assert!(!is_coin.check(&"push"));
/// ```
pub struct Predicate<I> {
    check: Arc<dyn Fn(&I) -> bool + Send + Sync>,
}

impl<I> Predicate<I> {
    /// Create a predicate from a function of the transition input.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Predicate {
            check: Arc::new(check),
        }
    }

    /// A predicate that accepts every input.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Evaluate the predicate against an input.
    pub fn check(&self, input: &I) -> bool {
        (self.check)(input)
    }
}

impl<I> Clone for Predicate<I> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<I> fmt::Debug for Predicate<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Event {
        Coin,
        Push,
    }

    #[test]
    fn predicate_matches_input() {
        let predicate = Predicate::new(|e: &Event| matches!(e, Event::Coin));

        assert!(predicate.check(&Event::Coin));
        assert!(!predicate.check(&Event::Push));
    }

    #[test]
    fn always_accepts_everything() {
        let predicate = Predicate::<u32>::always();

        assert!(predicate.check(&0));
        assert!(predicate.check(&u32::MAX));
    }

    #[test]
    fn predicate_is_deterministic() {
        let predicate = Predicate::new(|n: &i64| n % 2 == 0);

        assert_eq!(predicate.check(&4), predicate.check(&4));
        assert_eq!(predicate.check(&5), predicate.check(&5));
    }

    #[test]
    fn clones_share_the_same_function() {
        let predicate = Predicate::new(|s: &String| s.starts_with("go"));
        let cloned = predicate.clone();

        assert!(cloned.check(&"go home".to_string()));
        assert!(!cloned.check(&"stay".to_string()));
    }
}
