//! ufsm: a minimal predicate-guarded finite state machine
//!
//! A machine sits in one named state. Transitions are registered as
//! predicate-guarded edges between states; each call to `transition`
//! evaluates every edge leaving the current state and moves only when
//! exactly one predicate accepts the input. Zero or several accepting
//! predicates are errors, and in both cases nothing changes.
//!
//! Observers subscribe to entering or leaving a state. Their callbacks are
//! scheduled on a [`Dispatcher`](notify::Dispatcher) and never run inside
//! the `transition` call, so the new state is always visible before any
//! notification side effect.
//!
//! # Core Concepts
//!
//! - **State**: a validated, non-empty [`StateId`]
//! - **Predicate**: a one-input function guarding a transition
//! - **Resolution**: the exactly-one-candidate rule
//! - **Notifications**: asynchronous, FIFO entry/exit callbacks
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use ufsm::{FsmError, Machine};
//!
//! let mut fsm = Machine::new("initial").unwrap();
//! fsm.map("initial", "next", |_: &&str| true).unwrap();
//!
//! let entered = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&entered);
//! fsm.on_entry("next", move |input| {
//!     assert_eq!(*input, "x");
//!     flag.store(true, Ordering::SeqCst);
//! });
//!
//! fsm.transition("x").unwrap();
//! assert_eq!(fsm.current_state(), "next");
//! assert!(!entered.load(Ordering::SeqCst));
//!
//! fsm.run_pending();
//! assert!(entered.load(Ordering::SeqCst));
//!
//! assert!(matches!(
//!     fsm.transition("x"),
//!     Err(FsmError::NoValidTransition { .. })
//! ));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod notify;

// Re-export commonly used types
pub use crate::core::{FsmError, IntoStateId, Predicate, StateHistory, StateId, StateTransition};
pub use crate::machine::{Machine, MachineConfig, SharedMachine, WeakMachine};
pub use crate::notify::{Dispatcher, QueueDispatcher};
