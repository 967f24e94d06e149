//! Asynchronous entry/exit notifications.
//!
//! Subscribers are kept per state in registration order. When a transition
//! is applied, each subscriber of the left state and of the entered state is
//! handed to a [`Dispatcher`] as its own task, so no callback ever runs
//! inside the `transition` call.

mod dispatcher;
mod subscription;

#[cfg(feature = "tokio")]
pub use dispatcher::TokioDispatcher;
pub use dispatcher::{Dispatcher, QueueDispatcher, Task};
pub use subscription::{Subscriber, SubscriptionTable};
