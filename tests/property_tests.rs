//! Property-based tests for the engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use junction::builder::{guarded_transition, simple_transition, wildcard_transition};
use junction::core::Event;
use junction::decision::PriorityPolicy;
use junction::engine::{MachineError, StateMachine};
use junction::state_enum;
use proptest::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

state_enum! {
    enum TestState {
        Initial,
        Processing,
        Complete,
        Failed,
    }
}

const STATES: [TestState; 4] = [
    TestState::Initial,
    TestState::Processing,
    TestState::Complete,
    TestState::Failed,
];

prop_compose! {
    fn arbitrary_state()(variant in 0..4usize) -> TestState {
        STATES[variant]
    }
}

/// Event carrying the index of its target state.
#[derive(Clone, Copy, PartialEq, Debug)]
struct To(usize);

impl Event for To {
    fn name(&self) -> &str {
        "To"
    }
}

/// Every state moves to every other state on the event naming the target,
/// so any sequence of events yields a predictable path.
fn complete_graph() -> StateMachine<TestState, To> {
    let mut machine = StateMachine::new("graph");
    for state in STATES {
        machine.add_state(state).unwrap();
    }
    for from in STATES {
        for (event, to) in STATES.into_iter().enumerate() {
            if from != to {
                machine
                    .add_transition(simple_transition(from, to, To(event)))
                    .unwrap();
            }
        }
    }
    machine
}

fn guarded_machine(source: TestState, open: bool) -> StateMachine<TestState, &'static str> {
    let flag = Arc::new(AtomicBool::new(open));
    let mut machine = StateMachine::new("det");
    for s in STATES {
        machine.add_state(s).unwrap();
    }
    machine
        .add_transition(guarded_transition(source, TestState::Complete, "GO", move |_| {
            flag.load(Ordering::SeqCst)
        }))
        .unwrap();
    machine
        .add_transition(wildcard_transition(TestState::Failed, "GO"))
        .unwrap();
    machine
}

proptest! {
    #[test]
    fn history_is_initial_plus_every_target(
        initial in arbitrary_state(),
        events in prop::collection::vec(0..4usize, 0..20)
    ) {
        let mut machine = complete_graph();
        machine.start(initial).unwrap();
        let mut expected = vec![initial];

        for &event in &events {
            let fired = machine.trigger(&To(event)).unwrap();
            let target = STATES[event];
            prop_assert_eq!(fired, target != *expected.last().unwrap());
            if fired {
                expected.push(target);
            }
        }

        prop_assert_eq!(machine.history(), expected);
    }

    #[test]
    fn resolution_is_deterministic(state in arbitrary_state(), open in any::<bool>()) {
        let expected = if open { TestState::Complete } else { TestState::Failed };

        for _ in 0..3 {
            let mut machine = guarded_machine(state, open);
            prop_assert!(!machine.can_transition(&"GO"));
            machine.start(state).unwrap();
            prop_assert!(machine.can_transition(&"GO"));
            prop_assert!(machine.trigger(&"GO").unwrap());
            prop_assert_eq!(*machine.current_state().unwrap(), expected);
        }
    }

    #[test]
    fn duplicate_registration_never_grows_registry(states in prop::collection::vec(arbitrary_state(), 1..12)) {
        let mut machine: StateMachine<TestState, &'static str> = StateMachine::new("dups");
        let mut seen = Vec::new();

        for state in states {
            let before = machine.state_count();
            let result = machine.add_state(state);
            if seen.contains(&state) {
                let is_duplicate = matches!(result, Err(MachineError::DuplicateState { .. }));
                prop_assert!(is_duplicate);
                prop_assert_eq!(machine.state_count(), before);
            } else {
                prop_assert!(result.is_ok());
                seen.push(state);
            }
        }
    }

    #[test]
    fn batch_gate_matches_scalar_gate(
        lanes in prop::collection::vec((0..20u32, 0..15u32), 0..64)
    ) {
        let policy = PriorityPolicy::default();
        let (waiting, competing): (Vec<u32>, Vec<u32>) = lanes.iter().copied().unzip();

        let summary = policy.summarize(&waiting, &competing).unwrap();

        prop_assert_eq!(summary.decisions.len(), lanes.len());
        prop_assert_eq!(summary.green_count + summary.red_count, lanes.len());
        for ((w, c), decision) in lanes.iter().zip(&summary.decisions) {
            prop_assert_eq!(*decision, policy.is_local_lane_priority(*w, *c));
        }
    }
}
