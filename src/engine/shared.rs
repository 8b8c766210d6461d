//! A machine shared between threads.

use super::error::MachineError;
use super::machine::StateMachine;
use super::probe::StateProbe;
use super::registry::Behavior;
use super::table::TransitionRule;
use crate::core::{Event, State};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Cloneable handle that serializes every entry point of one machine
/// behind a single mutex.
///
/// Guards reading a peer should still go through the peer's
/// [`StateProbe`], which only holds the peer's own lock for the read.
pub struct SharedMachine<S: State, E: Event> {
    inner: Arc<Mutex<StateMachine<S, E>>>,
}

impl<S: State, E: Event> Clone for SharedMachine<S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State, E: Event> SharedMachine<S, E> {
    pub fn new(machine: StateMachine<S, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StateMachine<S, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_state(&self, state: S) -> Result<(), MachineError> {
        self.lock().add_state(state)
    }

    pub fn add_state_with<B>(&self, state: S, behavior: B) -> Result<(), MachineError>
    where
        B: Behavior<E> + 'static,
    {
        self.lock().add_state_with(state, behavior)
    }

    pub fn add_transition(&self, rule: TransitionRule<S, E>) -> Result<(), MachineError> {
        self.lock().add_transition(rule)
    }

    pub fn start(&self, initial: S) -> Result<(), MachineError> {
        self.lock().start(initial)
    }

    pub fn trigger(&self, event: &E) -> Result<bool, MachineError> {
        self.lock().trigger(event)
    }

    pub fn update(&self, delta: Duration) -> Result<(), MachineError> {
        self.lock().update(delta)
    }

    pub fn can_transition(&self, event: &E) -> bool {
        self.lock().can_transition(event)
    }

    pub fn current_state(&self) -> Result<S, MachineError> {
        self.lock().current_state().cloned()
    }

    pub fn history(&self) -> Vec<S> {
        self.lock().history()
    }

    pub fn probe(&self) -> StateProbe<S> {
        self.lock().probe()
    }

    /// Run `f` with exclusive access to the machine.
    pub fn with<R>(&self, f: impl FnOnce(&mut StateMachine<S, E>) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::simple_transition;
    use std::thread;

    #[test]
    fn concurrent_triggers_are_serialized() {
        let machine = SharedMachine::new(StateMachine::new("shared"));
        machine.add_state("A").unwrap();
        machine.add_state("B").unwrap();
        machine.add_transition(simple_transition("A", "B", "FLIP")).unwrap();
        machine.add_transition(simple_transition("B", "A", "FLIP")).unwrap();
        machine.start("A").unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let machine = machine.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        machine.trigger(&"FLIP").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(machine.history().len(), 101);
        assert_eq!(machine.current_state().unwrap(), "A");
    }

    #[test]
    fn with_exposes_the_machine() {
        let machine: SharedMachine<&'static str, &'static str> =
            SharedMachine::new(StateMachine::new("shared"));
        machine.add_state("A").unwrap();

        let count = machine.with(|m| m.state_count());

        assert_eq!(count, 1);
    }
}
