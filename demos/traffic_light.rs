//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - States declared with `state_enum!`
//! - Entry notifications that run after each transition
//!
//! Run with: cargo run --example traffic_light

use ufsm::builder::{guarded, MachineBuilder};
use ufsm::state_enum;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Signal {
    Timer,
    Emergency,
}

fn on(expected: Signal) -> impl Fn(&Signal) -> bool + Send + Sync + 'static {
    move |signal| *signal == expected
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let mut machine = MachineBuilder::<Signal>::new()
        .initial(TrafficLight::Red)
        .transitions(vec![
            guarded(TrafficLight::Red, TrafficLight::Green, on(Signal::Timer)).unwrap(),
            guarded(TrafficLight::Green, TrafficLight::Yellow, on(Signal::Timer)).unwrap(),
            guarded(TrafficLight::Yellow, TrafficLight::Red, |_| true).unwrap(),
            guarded(TrafficLight::Green, TrafficLight::Red, on(Signal::Emergency)).unwrap(),
        ])
        .on_entry(TrafficLight::Red.name(), |s| println!("  [notify] stop ({s:?})"))
        .on_entry(TrafficLight::Green.name(), |s| println!("  [notify] go ({s:?})"))
        .build()
        .unwrap();

    println!("Initial state: {}\n", machine.current_state());

    for signal in [
        Signal::Timer,
        Signal::Timer,
        Signal::Timer,
        Signal::Timer,
        Signal::Emergency,
        Signal::Emergency,
    ] {
        match machine.transition(signal) {
            Ok(()) => println!("{signal:?} -> {}", machine.current_state()),
            Err(err) => println!("{signal:?} rejected: {err}"),
        }
        machine.run_pending();
    }

    println!("\nPath taken:");
    for state in machine.history().get_path() {
        println!("  {state}");
    }

    println!("\n=== Example Complete ===");
}
