//! The state machine engine.
//!
//! [`Machine`] owns the current state, the transition table and the
//! entry/exit subscriptions. [`SharedMachine`] wraps it for hosts that drive
//! one machine from several threads or from its own subscribers.

mod config;
#[allow(clippy::module_inception)]
mod machine;
mod shared;

pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use machine::Machine;
pub use shared::{SharedMachine, WeakMachine};
