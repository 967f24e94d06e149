//! Scheduling primitives for entry/exit notifications.
//!
//! A dispatcher accepts tasks and runs them later, never inline with the
//! call that scheduled them. Tasks from one dispatcher run in the order they
//! were scheduled.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A unit of deferred notification work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Deferred, FIFO execution of notification tasks.
pub trait Dispatcher: Send + Sync {
    /// Schedule a task to run after the current operation completes.
    fn schedule(&self, task: Task);

    /// Schedule several tasks at once, to run in the given order.
    ///
    /// No task of the batch may start before the whole batch is handed over.
    fn schedule_all(&self, tasks: Vec<Task>) {
        for task in tasks {
            self.schedule(task);
        }
    }

    /// Run tasks that are waiting for the host to drive them.
    ///
    /// Returns the number of tasks executed. Dispatchers that drive
    /// themselves return `0`.
    fn run_pending(&self) -> usize {
        0
    }
}

/// Explicit task queue drained by the host.
///
/// Nothing runs until [`QueueDispatcher::run_pending`] is called, which
/// mirrors a cooperative "next tick" queue: the caller finishes its current
/// work, then yields to the queue.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use ufsm::notify::{Dispatcher, QueueDispatcher};
///
/// let queue = QueueDispatcher::new();
/// let runs = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&runs);
/// queue.schedule(Box::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// assert_eq!(runs.load(Ordering::SeqCst), 0);
/// assert_eq!(queue.run_pending(), 1);
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct QueueDispatcher {
    queue: Arc<Mutex<VecDeque<Task>>>,
}

impl QueueDispatcher {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Run queued tasks until the queue is empty.
    ///
    /// Tasks scheduled while draining run in the same call, after the ones
    /// already queued. The queue lock is released while each task runs, so
    /// tasks may schedule more work.
    pub fn run_pending(&self) -> usize {
        let mut executed = 0;
        loop {
            let next = self.lock().pop_front();
            let Some(task) = next else {
                break;
            };
            task();
            executed += 1;
        }
        if executed > 0 {
            tracing::trace!(executed, "drained notification queue");
        }
        executed
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Dispatcher for QueueDispatcher {
    fn schedule(&self, task: Task) {
        self.lock().push_back(task);
    }

    fn schedule_all(&self, tasks: Vec<Task>) {
        self.lock().extend(tasks);
    }

    fn run_pending(&self) -> usize {
        QueueDispatcher::run_pending(self)
    }
}

impl fmt::Debug for QueueDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueDispatcher")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Dispatcher backed by a tokio worker task.
///
/// Scheduled tasks are sent over an unbounded channel to a single spawned
/// task that runs them one at a time, in order. A batch from
/// [`Dispatcher::schedule_all`] travels as one message.
///
/// On a multi-thread runtime the worker runs concurrently with the caller:
/// a transition's tasks are only handed over once the new state is applied,
/// but they may start before `transition` has returned. Use a
/// `current_thread` runtime or [`QueueDispatcher`] when callbacks must wait
/// for the caller to yield.
///
/// A panicking task is logged and skipped; the worker keeps running.
#[cfg(feature = "tokio")]
#[derive(Clone, Debug)]
pub struct TokioDispatcher {
    tx: tokio::sync::mpsc::UnboundedSender<Vec<Task>>,
}

#[cfg(feature = "tokio")]
impl TokioDispatcher {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn() -> Self {
        Self::spawn_on(&tokio::runtime::Handle::current())
    }

    /// Spawn the worker on the given runtime.
    pub fn spawn_on(handle: &tokio::runtime::Handle) -> Self {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Vec<Task>>();
        handle.spawn(async move {
            while let Some(batch) = rx.recv().await {
                for task in batch {
                    run_isolated(task);
                }
            }
            tracing::debug!("notification worker stopped");
        });
        Self { tx }
    }

    fn send(&self, batch: Vec<Task>) {
        let tasks = batch.len();
        if self.tx.send(batch).is_err() {
            tracing::warn!(tasks, "notification worker is gone, dropping tasks");
        }
    }
}

#[cfg(feature = "tokio")]
fn run_isolated(task: Task) {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    if let Err(payload) = catch_unwind(AssertUnwindSafe(task)) {
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        tracing::error!(panic = message, "notification task panicked");
    }
}

#[cfg(feature = "tokio")]
impl Dispatcher for TokioDispatcher {
    fn schedule(&self, task: Task) {
        self.send(vec![task]);
    }

    fn schedule_all(&self, tasks: Vec<Task>) {
        if !tasks.is_empty() {
            self.send(tasks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Task) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = Arc::clone(&log);
        let make = move |n: u32| -> Task {
            let log = Arc::clone(&handle);
            Box::new(move || log.lock().unwrap().push(n))
        };
        (log, make)
    }

    #[test]
    fn tasks_do_not_run_when_scheduled() {
        let queue = QueueDispatcher::new();
        let (log, task) = recorder();

        queue.schedule(task(1));

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn tasks_run_in_fifo_order() {
        let queue = QueueDispatcher::new();
        let (log, task) = recorder();

        queue.schedule(task(1));
        queue.schedule(task(2));
        queue.schedule(task(3));

        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn tasks_scheduled_while_draining_run_last() {
        let queue = QueueDispatcher::new();
        let (log, task) = recorder();

        let inner = queue.clone();
        let late = task(3);
        let first = task(1);
        queue.schedule(Box::new(move || {
            first();
            inner.schedule(late);
        }));
        queue.schedule(task(2));

        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_queue_runs_nothing() {
        let queue = QueueDispatcher::new();
        assert_eq!(queue.run_pending(), 0);
    }

    #[test]
    fn clones_share_one_queue() {
        let queue = QueueDispatcher::new();
        let other = queue.clone();
        let (log, task) = recorder();

        other.schedule(task(7));

        assert_eq!(queue.pending(), 1);
        queue.run_pending();
        assert_eq!(*log.lock().unwrap(), vec![7]);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn tokio_dispatcher_runs_tasks_in_order() {
        let dispatcher = TokioDispatcher::spawn();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        for n in 0..5u32 {
            let tx = tx.clone();
            dispatcher.schedule(Box::new(move || {
                let _ = tx.send(n);
            }));
        }

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(rx.recv().await.unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn batch_is_queued_whole_and_in_order() {
        let queue = QueueDispatcher::new();
        let (log, task) = recorder();

        queue.schedule(task(1));
        queue.schedule_all(vec![task(2), task(3)]);

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(queue.pending(), 3);
        queue.run_pending();
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn tokio_worker_survives_panicking_task() {
        let dispatcher = TokioDispatcher::spawn();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        dispatcher.schedule(Box::new(|| panic!("subscriber failed")));
        let after = tx.clone();
        let batch: Vec<Task> = vec![
            Box::new(|| panic!("another failure")),
            Box::new(move || {
                let _ = after.send("same batch");
            }),
        ];
        dispatcher.schedule_all(batch);
        dispatcher.schedule(Box::new(move || {
            let _ = tx.send("next batch");
        }));

        assert_eq!(rx.recv().await, Some("same batch"));
        assert_eq!(rx.recv().await, Some("next batch"));
    }
}
