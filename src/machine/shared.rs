//! Thread-safe handle to a machine.

use crate::core::{FsmError, IntoStateId, StateId};
use crate::machine::machine::Machine;
use crate::notify::Dispatcher;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Cloneable, lockable handle to a [`Machine`].
///
/// Each `transition` holds the lock for the whole resolve/decide/apply
/// sequence. Notification callbacks never run under the lock, so a
/// subscriber may transition the same machine again.
///
/// Subscribers are owned by the machine. A subscriber that captures a
/// `SharedMachine` clone keeps its own machine alive forever; capture a
/// [`WeakMachine`] from [`downgrade`](SharedMachine::downgrade) instead.
///
/// # Example
///
/// ```rust
/// use ufsm::machine::{Machine, SharedMachine};
///
/// let mut machine = Machine::new("red").unwrap();
/// machine
///     .map("red", "green", |_: &()| true)
///     .unwrap()
///     .map("green", "yellow", |_: &()| true)
///     .unwrap();
///
/// let shared = SharedMachine::new(machine);
/// let handle = shared.downgrade();
/// shared.with(|m| {
///     m.on_entry("green", move |_| {
///         if let Some(machine) = handle.upgrade() {
///             machine.transition(()).unwrap();
///         }
///     });
/// });
///
/// shared.transition(()).unwrap();
/// assert_eq!(shared.current_state(), "green");
///
/// shared.run_pending();
/// assert_eq!(shared.current_state(), "yellow");
/// ```
pub struct SharedMachine<I> {
    inner: Arc<Mutex<Machine<I>>>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl<I: Send + Sync + 'static> SharedMachine<I> {
    /// Take ownership of `machine` and share it.
    pub fn new(machine: Machine<I>) -> Self {
        let dispatcher = Arc::clone(machine.dispatcher());
        Self {
            inner: Arc::new(Mutex::new(machine)),
            dispatcher,
        }
    }

    /// Resolve and apply a transition under the lock.
    pub fn transition(&self, input: I) -> Result<(), FsmError> {
        self.lock().transition(input)
    }

    /// Register a transition under the lock.
    pub fn map<F>(
        &self,
        from: impl IntoStateId,
        to: impl IntoStateId,
        predicate: F,
    ) -> Result<(), FsmError>
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.lock().map(from, to, predicate).map(|_| ())
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> StateId {
        self.lock().current_state().clone()
    }

    /// Run pending notifications without holding the machine lock.
    pub fn run_pending(&self) -> usize {
        self.dispatcher.run_pending()
    }

    /// Run `f` with exclusive access to the machine.
    ///
    /// Calling back into this handle from inside `f` deadlocks.
    pub fn with<R>(&self, f: impl FnOnce(&mut Machine<I>) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Machine<I>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<I> SharedMachine<I> {
    /// Non-owning handle for subscribers of this machine.
    pub fn downgrade(&self) -> WeakMachine<I> {
        WeakMachine {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<I> Clone for SharedMachine<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

/// Non-owning handle to a shared machine.
///
/// Does not keep the machine alive, so it can be captured by the machine's
/// own subscribers.
pub struct WeakMachine<I> {
    inner: Weak<Mutex<Machine<I>>>,
}

impl<I> WeakMachine<I> {
    /// A shared handle, or `None` once every `SharedMachine` is dropped.
    pub fn upgrade(&self) -> Option<SharedMachine<I>> {
        let inner = self.inner.upgrade()?;
        let dispatcher = {
            let machine = inner.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(machine.dispatcher())
        };
        Some(SharedMachine { inner, dispatcher })
    }
}

impl<I> Clone for WeakMachine<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}
