//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use ufsm::{FsmError, IntoStateId, Machine, StateId};

const INITIAL: &str = "initial";

prop_compose! {
    fn state_name()(name in "[a-z][a-z0-9_]{0,11}") -> String {
        name
    }
}

/// Machine with one outgoing transition per entry of `accepts`; the
/// destination `d{i}` accepts every input iff `accepts[i]`.
fn fan_out(accepts: &[bool]) -> Machine<u32> {
    let mut machine = Machine::new(INITIAL).unwrap();
    for (i, accept) in accepts.iter().copied().enumerate() {
        machine
            .map(INITIAL, format!("d{i}"), move |_| accept)
            .unwrap();
    }
    machine
}

proptest! {
    #[test]
    fn non_empty_names_construct(name in ".+") {
        let machine = Machine::<()>::new(name.as_str()).unwrap();
        prop_assert_eq!(machine.current_state().as_str(), name.as_str());
    }

    #[test]
    fn non_zero_numbers_construct_as_their_string_form(n in 1u64..) {
        let machine = Machine::<()>::new(n).unwrap();
        prop_assert_eq!(machine.current_state().as_str(), n.to_string());
    }

    #[test]
    fn map_validates_each_state_independently(name in state_name()) {
        let mut machine = Machine::<()>::new(INITIAL).unwrap();

        prop_assert_eq!(
            machine.map("", name.as_str(), |_| true).err(),
            Some(FsmError::InvalidState)
        );
        prop_assert_eq!(
            machine.map(name.as_str(), "", |_| true).err(),
            Some(FsmError::InvalidState)
        );
        prop_assert!(machine.map(name.as_str(), name.as_str(), |_| true).is_ok());
    }

    #[test]
    fn exactly_one_candidate_rule(accepts in prop::collection::vec(any::<bool>(), 0..8)) {
        let mut machine = fan_out(&accepts);
        let accepted: Vec<StateId> = accepts
            .iter()
            .enumerate()
            .filter(|(_, accept)| **accept)
            .map(|(i, _)| format!("d{i}").into_state_id().unwrap())
            .collect();

        let result = machine.transition(0);

        match accepted.len() {
            0 => {
                prop_assert!(
                    matches!(result, Err(FsmError::NoValidTransition { .. })),
                    "expected NoValidTransition, got {:?}",
                    result
                );
                prop_assert_eq!(machine.current_state().as_str(), INITIAL);
            }
            1 => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(machine.current_state(), &accepted[0]);
            }
            _ => {
                match result {
                    Err(FsmError::AmbiguousTransition { from, mut candidates }) => {
                        prop_assert_eq!(from.as_str(), INITIAL);
                        let mut expected = accepted.clone();
                        candidates.sort();
                        expected.sort();
                        prop_assert_eq!(candidates, expected);
                    }
                    other => prop_assert!(false, "expected ambiguity, got {:?}", other),
                }
                prop_assert_eq!(machine.current_state().as_str(), INITIAL);
            }
        }
    }

    #[test]
    fn resolution_is_deterministic(
        thresholds in prop::collection::vec(0u32..100, 1..6),
        input in 0u32..100,
    ) {
        let build = || {
            let mut machine = Machine::<u32>::new(INITIAL).unwrap();
            for (i, threshold) in thresholds.iter().copied().enumerate() {
                machine
                    .map(INITIAL, format!("t{i}"), move |n| *n >= threshold)
                    .unwrap();
            }
            machine
        };

        let first = build().resolve(&input);
        let second = build().resolve(&input);
        let machine = build();
        let again = (machine.resolve(&input), machine.resolve(&input));

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&again.0, &again.1);
        prop_assert_eq!(first, again.0);
    }

    #[test]
    fn subscribers_fire_in_registration_order(count in 1usize..10) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine = Machine::<u32>::new(INITIAL).unwrap();
        machine.map(INITIAL, "next", |_| true).unwrap();

        for i in 0..count {
            let exit_log = Arc::clone(&log);
            machine.on_exit(INITIAL, move |_| exit_log.lock().unwrap().push(format!("exit{i}")));
            let entry_log = Arc::clone(&log);
            machine.on_entry("next", move |_| entry_log.lock().unwrap().push(format!("entry{i}")));
        }

        machine.transition(7).unwrap();
        prop_assert!(log.lock().unwrap().is_empty());

        prop_assert_eq!(machine.run_pending(), count * 2);

        let expected: Vec<String> = (0..count)
            .map(|i| format!("exit{i}"))
            .chain((0..count).map(|i| format!("entry{i}")))
            .collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }

    #[test]
    fn history_path_follows_applied_transitions(
        steps in prop::collection::vec(state_name(), 1..10)
    ) {
        let mut machine = Machine::<usize>::new(INITIAL).unwrap();
        let mut from = INITIAL.to_string();
        for (i, to) in steps.iter().enumerate() {
            machine
                .map(from.as_str(), to.as_str(), move |step| *step == i)
                .unwrap();
            from = to.clone();
        }

        let mut applied = 0;
        for i in 0..steps.len() {
            if machine.transition(i).is_err() {
                break;
            }
            applied += 1;
        }

        prop_assert_eq!(machine.sequence(), applied as u64);
        prop_assert_eq!(machine.history().len(), applied);
        if let Some(last) = machine.history().last() {
            prop_assert_eq!(&last.to, machine.current_state());
        }
    }
}
