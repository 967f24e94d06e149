//! The transition engine.

use crate::core::{FsmError, IntoStateId, Predicate, StateHistory, StateId, StateTransition};
use crate::machine::config::MachineConfig;
use crate::notify::{Dispatcher, QueueDispatcher, Subscriber, SubscriptionTable};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Predicate-guarded state machine with asynchronous entry/exit notifications.
///
/// Transitions are registered with [`map`](Machine::map). Each call to
/// [`transition`](Machine::transition) evaluates every predicate mapped from
/// the current state and moves only if exactly one accepts the input.
/// Subscribers of the left and entered states are scheduled on the
/// machine's [`Dispatcher`] and run after `transition` has returned.
///
/// # Example
///
/// ```rust
/// use ufsm::machine::Machine;
///
/// let mut turnstile = Machine::new("locked").unwrap();
/// turnstile
///     .map("locked", "unlocked", |input: &&str| *input == "coin")
///     .unwrap()
///     .map("unlocked", "locked", |input: &&str| *input == "push")
///     .unwrap();
///
/// turnstile.transition("coin").unwrap();
/// assert_eq!(turnstile.current_state(), "unlocked");
///
/// assert!(turnstile.transition("coin").is_err());
/// assert_eq!(turnstile.current_state(), "unlocked");
/// ```
pub struct Machine<I> {
    current: StateId,
    transitions: HashMap<StateId, BTreeMap<StateId, Predicate<I>>>,
    entry: SubscriptionTable<I>,
    exit: SubscriptionTable<I>,
    dispatcher: Arc<dyn Dispatcher>,
    config: MachineConfig,
    history: StateHistory,
    sequence: u64,
}

impl<I: Send + Sync + 'static> Machine<I> {
    /// Create a machine in `initial`, notifying through a fresh
    /// [`QueueDispatcher`] drained by [`run_pending`](Machine::run_pending).
    pub fn new(initial: impl IntoStateId) -> Result<Self, FsmError> {
        Self::with_dispatcher(initial, Arc::new(QueueDispatcher::new()))
    }

    /// Create a machine in `initial` that schedules notifications on `dispatcher`.
    pub fn with_dispatcher(
        initial: impl IntoStateId,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Result<Self, FsmError> {
        let current = initial.into_state_id()?;
        tracing::debug!(initial = %current, "created state machine");
        Ok(Self {
            current,
            transitions: HashMap::new(),
            entry: SubscriptionTable::new(),
            exit: SubscriptionTable::new(),
            dispatcher,
            config: MachineConfig::default(),
            history: StateHistory::new(),
            sequence: 0,
        })
    }

    /// Replace the machine's configuration.
    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a transition from `from` to `to` guarded by `predicate`.
    ///
    /// Both states are validated independently. Mapping the same ordered
    /// pair again replaces its predicate.
    pub fn map<F>(
        &mut self,
        from: impl IntoStateId,
        to: impl IntoStateId,
        predicate: F,
    ) -> Result<&mut Self, FsmError>
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.map_predicate(from, to, Predicate::new(predicate))
    }

    /// Register a transition with an already constructed [`Predicate`].
    pub fn map_predicate(
        &mut self,
        from: impl IntoStateId,
        to: impl IntoStateId,
        predicate: Predicate<I>,
    ) -> Result<&mut Self, FsmError> {
        let from = from.into_state_id()?;
        let to = to.into_state_id()?;
        tracing::debug!(from = %from, to = %to, "mapped transition");
        self.transitions
            .entry(from)
            .or_default()
            .insert(to, predicate);
        Ok(self)
    }

    /// Subscribe to entries into `state`.
    pub fn on_entry<F>(&mut self, state: impl AsRef<str>, callback: F) -> &mut Self
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        self.entry.add(state, Subscriber::new(callback));
        self
    }

    /// Subscribe to entries into `state` with a bound context.
    pub fn on_entry_with<C, F>(
        &mut self,
        state: impl AsRef<str>,
        context: C,
        callback: F,
    ) -> &mut Self
    where
        C: Send + Sync + 'static,
        F: Fn(&C, &I) + Send + Sync + 'static,
    {
        self.entry.add(state, Subscriber::with_context(context, callback));
        self
    }

    /// Subscribe to exits from `state`.
    pub fn on_exit<F>(&mut self, state: impl AsRef<str>, callback: F) -> &mut Self
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        self.exit.add(state, Subscriber::new(callback));
        self
    }

    /// Subscribe to exits from `state` with a bound context.
    pub fn on_exit_with<C, F>(
        &mut self,
        state: impl AsRef<str>,
        context: C,
        callback: F,
    ) -> &mut Self
    where
        C: Send + Sync + 'static,
        F: Fn(&C, &I) + Send + Sync + 'static,
    {
        self.exit.add(state, Subscriber::with_context(context, callback));
        self
    }

    pub(crate) fn add_entry_subscriber(&mut self, state: &str, subscriber: Subscriber<I>) {
        self.entry.add(state, subscriber);
    }

    pub(crate) fn add_exit_subscriber(&mut self, state: &str, subscriber: Subscriber<I>) {
        self.exit.add(state, subscriber);
    }

    /// Decide the next state for `input` without changing anything.
    ///
    /// Every predicate mapped from the current state is evaluated (in
    /// lexical order of the destination name) before deciding, so an
    /// ambiguity is always reported with its full candidate list.
    pub fn resolve(&self, input: &I) -> Result<StateId, FsmError> {
        let mut candidates: Vec<StateId> = Vec::new();

        if let Some(outgoing) = self.transitions.get(&self.current) {
            for (to, predicate) in outgoing {
                let accepted = predicate.check(input);
                tracing::trace!(from = %self.current, to = %to, accepted, "evaluated predicate");
                if accepted {
                    candidates.push(to.clone());
                }
            }
        }

        match candidates.len() {
            0 => {
                tracing::debug!(from = %self.current, "no valid transition");
                Err(FsmError::NoValidTransition {
                    from: self.current.clone(),
                })
            }
            1 => Ok(candidates.remove(0)),
            _ => {
                tracing::debug!(from = %self.current, ?candidates, "ambiguous transition");
                Err(FsmError::AmbiguousTransition {
                    from: self.current.clone(),
                    candidates,
                })
            }
        }
    }

    /// Resolve and apply a transition for `input`.
    ///
    /// On success the new state is visible as soon as this returns. Exit
    /// notifications for the old state and then entry notifications for the
    /// new state are handed to the dispatcher as one batch, after the state,
    /// sequence and history are updated. On failure nothing changes and
    /// nothing is scheduled.
    pub fn transition(&mut self, input: I) -> Result<(), FsmError> {
        let next = self.resolve(&input)?;
        let input = Arc::new(input);

        let mut tasks = self.exit.tasks(self.current.as_str(), &input);
        let exits = tasks.len();
        let previous = std::mem::replace(&mut self.current, next);
        tasks.extend(self.entry.tasks(self.current.as_str(), &input));
        let entries = tasks.len() - exits;

        self.sequence += 1;
        tracing::debug!(
            from = %previous,
            to = %self.current,
            sequence = self.sequence,
            exits,
            entries,
            "applied transition"
        );

        if self.config.record_history {
            let record = StateTransition {
                from: previous,
                to: self.current.clone(),
                timestamp: Utc::now(),
                sequence: self.sequence,
            };
            self.history.push_bounded(record, self.config.history_limit);
        }

        if !tasks.is_empty() {
            self.dispatcher.schedule_all(tasks);
        }
        Ok(())
    }

    /// Run notifications waiting on a host-driven dispatcher.
    ///
    /// Returns the number of callbacks executed.
    pub fn run_pending(&self) -> usize {
        self.dispatcher.run_pending()
    }
}

impl<I> Machine<I> {
    /// The current state.
    pub fn current_state(&self) -> &StateId {
        &self.current
    }

    /// Destinations mapped from `from`, in evaluation order.
    pub fn destinations<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a StateId> + 'a {
        self.transitions
            .get(from)
            .into_iter()
            .flat_map(|outgoing| outgoing.keys())
    }

    /// Whether a transition from `from` to `to` is mapped.
    pub fn has_transition(&self, from: &str, to: &str) -> bool {
        self.transitions
            .get(from)
            .is_some_and(|outgoing| outgoing.contains_key(to))
    }

    /// Applied transitions, oldest first.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Number of transitions applied over the machine's lifetime.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The configuration in effect.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The dispatcher notifications are scheduled on.
    pub fn dispatcher(&self) -> &Arc<dyn Dispatcher> {
        &self.dispatcher
    }

    pub(crate) fn reset_position(
        &mut self,
        current: StateId,
        history: StateHistory,
        sequence: u64,
    ) {
        self.current = current;
        self.history = history;
        self.sequence = sequence;
    }
}

impl<I> fmt::Debug for Machine<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("transitions", &self.transitions.len())
            .field("entry", &self.entry)
            .field("exit", &self.exit)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}
