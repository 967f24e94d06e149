//! Door Lock
//!
//! This example demonstrates a keypad lock driven from several threads.
//!
//! Key concepts:
//! - `SharedMachine` as the critical section around each transition
//! - A subscriber that re-enters `transition` through a weak handle (auto re-lock)
//! - Ambiguous and dead-end inputs reported as errors
//! - Snapshot and resume of the machine's position
//!
//! Run with: cargo run --example door_lock

use std::thread;
use ufsm::checkpoint::Snapshot;
use ufsm::{Machine, MachineConfig, SharedMachine};

const CODE: &str = "1234";

#[derive(Debug, Clone)]
enum Input {
    Code(String),
    Close,
    Timeout,
}

fn lock() -> Machine<Input> {
    let config = MachineConfig::from_json(r#"{ "history_limit": 32 }"#).unwrap();
    let mut machine: Machine<Input> = Machine::new("locked").unwrap().with_config(config);
    machine
        .map("locked", "open", |i| matches!(i, Input::Code(c) if c == CODE))
        .unwrap()
        .map("locked", "alarm", |i| matches!(i, Input::Code(c) if c != CODE))
        .unwrap()
        .map("open", "locked", |i| matches!(i, Input::Close | Input::Timeout))
        .unwrap()
        .map("alarm", "locked", |i| matches!(i, Input::Code(c) if c == CODE))
        .unwrap();
    machine
}

fn main() {
    println!("=== Door Lock Example ===\n");

    let shared = SharedMachine::new(lock());
    let relock = shared.downgrade();
    shared.with(|m| {
        m.on_entry("open", move |_| {
            println!("  [notify] door opened, scheduling timeout");
            let Some(machine) = relock.upgrade() else {
                return;
            };
            if let Err(err) = machine.transition(Input::Timeout) {
                println!("  [notify] re-lock failed: {err}");
            }
        })
        .on_entry("alarm", |i| println!("  [notify] ALARM on {i:?}"));
    });

    let workers: Vec<_> = ["0000", CODE]
        .into_iter()
        .map(|code| {
            let shared = shared.clone();
            thread::spawn(move || {
                let result = shared.transition(Input::Code(code.to_string()));
                println!("code {code}: {result:?} -> {}", shared.current_state());
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    shared.run_pending();
    println!("\nAfter notifications: {}", shared.current_state());

    match shared.transition(Input::Close) {
        Ok(()) => println!("close accepted"),
        Err(err) => println!("close rejected: {err}"),
    }

    let snapshot = shared.with(|m| m.snapshot());
    let json = snapshot.to_json().unwrap();
    println!("\nSnapshot: {json}");

    let mut resumed = lock();
    resumed.restore(&Snapshot::from_json(&json).unwrap()).unwrap();
    println!(
        "Resumed in '{}' after {} transitions",
        resumed.current_state(),
        resumed.sequence()
    );

    println!("\n=== Example Complete ===");
}
