//! Entry/exit subscriber tables.

use super::dispatcher::Task;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Callback<I> = Arc<dyn Fn(&I) + Send + Sync>;

/// A notification callback, optionally bound to a context value.
pub struct Subscriber<I> {
    callback: Callback<I>,
    has_context: bool,
}

impl<I> Subscriber<I> {
    /// Subscriber invoked with the transition input only.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            has_context: false,
        }
    }

    /// Subscriber invoked with a bound context and the transition input.
    pub fn with_context<C, F>(context: C, callback: F) -> Self
    where
        C: Send + Sync + 'static,
        F: Fn(&C, &I) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(move |input: &I| callback(&context, input)),
            has_context: true,
        }
    }

    /// Whether the callback was bound with [`Subscriber::with_context`].
    pub fn has_context(&self) -> bool {
        self.has_context
    }

    /// Invoke the callback now, on the current thread.
    pub fn call(&self, input: &I) {
        (self.callback)(input)
    }
}

impl<I> Clone for Subscriber<I> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
            has_context: self.has_context,
        }
    }
}

impl<I> fmt::Debug for Subscriber<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("has_context", &self.has_context)
            .finish_non_exhaustive()
    }
}

/// Ordered subscribers keyed by state name.
///
/// Keys are not validated: any name may be subscribed, including states
/// that never appear in a transition.
pub struct SubscriptionTable<I> {
    subscribers: HashMap<String, Vec<Subscriber<I>>>,
}

impl<I> SubscriptionTable<I> {
    /// Create a table with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Append a subscriber to the list for `state`.
    pub fn add(&mut self, state: impl AsRef<str>, subscriber: Subscriber<I>) {
        self.subscribers
            .entry(state.as_ref().to_string())
            .or_default()
            .push(subscriber);
    }

    /// Subscribers for `state`, in registration order.
    pub fn get(&self, state: &str) -> &[Subscriber<I>] {
        self.subscribers.get(state).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<I: Send + Sync + 'static> SubscriptionTable<I> {
    /// One task per subscriber of `state`, in registration order.
    ///
    /// Nothing runs until the tasks are handed to a dispatcher.
    pub fn tasks(&self, state: &str, input: &Arc<I>) -> Vec<Task> {
        self.get(state)
            .iter()
            .map(|subscriber| {
                let subscriber = subscriber.clone();
                let input = Arc::clone(input);
                Box::new(move || subscriber.call(&input)) as Task
            })
            .collect()
    }
}

impl<I> Default for SubscriptionTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> fmt::Debug for SubscriptionTable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(state, list)| (state.as_str(), list.len()))
            .collect();
        f.debug_struct("SubscriptionTable")
            .field("subscribers", &counts)
            .finish()
    }
}
