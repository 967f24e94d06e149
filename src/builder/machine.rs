//! Builder for constructing state machines.

use crate::builder::error::{BuildError, BuildErrors};
use crate::builder::transition::{TransitionBuilder, TransitionDef};
use crate::core::{FsmError, IntoStateId, StateId};
use crate::machine::{Machine, MachineConfig};
use crate::notify::{Dispatcher, QueueDispatcher, Subscriber};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing machines with a fluent API.
///
/// Problems are collected rather than reported one at a time: `build`
/// returns every missing or invalid piece at once.
///
/// # Example
///
/// ```rust
/// use ufsm::builder::{always, MachineBuilder, TransitionBuilder};
///
/// let machine = MachineBuilder::<u32>::new()
///     .initial("idle")
///     .transition(
///         TransitionBuilder::new()
///             .from("idle")
///             .to("busy")
///             .when(|jobs: &u32| *jobs > 0),
///     )
///     .add_transition(always("busy", "idle").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), "idle");
/// ```
pub struct MachineBuilder<I> {
    initial: Option<Result<StateId, FsmError>>,
    transitions: Vec<Result<TransitionDef<I>, BuildError>>,
    entry: Vec<(String, Subscriber<I>)>,
    exit: Vec<(String, Subscriber<I>)>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    config: MachineConfig,
}

impl<I: Send + Sync + 'static> MachineBuilder<I> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            entry: Vec::new(),
            exit: Vec::new(),
            dispatcher: None,
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl IntoStateId) -> Self {
        self.initial = Some(state.into_state_id());
        self
    }

    /// Add a transition from a builder; its errors are reported by `build`.
    pub fn transition(mut self, builder: TransitionBuilder<I>) -> Self {
        self.transitions.push(builder.build());
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionDef<I>) -> Self {
        self.transitions.push(Ok(transition));
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<TransitionDef<I>>) -> Self {
        self.transitions.extend(transitions.into_iter().map(Ok));
        self
    }

    /// Subscribe to entries into `state`.
    pub fn on_entry<F>(mut self, state: impl AsRef<str>, callback: F) -> Self
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        self.entry
            .push((state.as_ref().to_string(), Subscriber::new(callback)));
        self
    }

    /// Subscribe to exits from `state`.
    pub fn on_exit<F>(mut self, state: impl AsRef<str>, callback: F) -> Self
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        self.exit
            .push((state.as_ref().to_string(), Subscriber::new(callback)));
        self
    }

    /// Schedule notifications on `dispatcher` instead of a fresh queue.
    pub fn dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Use `config` instead of [`MachineConfig::default`].
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the machine, reporting every problem found.
    pub fn build(self) -> Result<Machine<I>, BuildErrors> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        let initial = match self.initial {
            Some(Ok(state)) => Some(state),
            Some(Err(err)) => {
                checks.push(Validation::fail(BuildError::from(err)));
                None
            }
            None => {
                checks.push(Validation::fail(BuildError::MissingInitialState));
                None
            }
        };

        let mut definitions = Vec::with_capacity(self.transitions.len());
        for transition in self.transitions {
            match transition {
                Ok(definition) => definitions.push(definition),
                Err(err) => checks.push(Validation::fail(err)),
            }
        }

        let errors: Vec<BuildError> = match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        };

        let initial = match initial {
            Some(initial) if errors.is_empty() => initial,
            _ => return Err(BuildErrors(errors)),
        };

        let dispatcher = self
            .dispatcher
            .unwrap_or_else(|| Arc::new(QueueDispatcher::new()));
        let mut machine = Machine::with_dispatcher(initial, dispatcher)
            .map_err(|err| BuildErrors(vec![err.into()]))?
            .with_config(self.config);

        for definition in definitions {
            machine
                .map_predicate(definition.from, definition.to, definition.predicate)
                .map_err(|err| BuildErrors(vec![err.into()]))?;
        }
        for (state, subscriber) in self.entry {
            machine.add_entry_subscriber(&state, subscriber);
        }
        for (state, subscriber) in self.exit {
            machine.add_exit_subscriber(&state, subscriber);
        }

        Ok(machine)
    }
}

impl<I: Send + Sync + 'static> Default for MachineBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}
