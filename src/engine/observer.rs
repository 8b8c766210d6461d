//! Injectable transition sinks.

use crate::core::{Event, State};
use std::sync::{Arc, Mutex, PoisonError};

/// Receives every start and committed transition of a machine.
///
/// Observers are called once the new state is recorded in history and
/// before its `on_enter` runs, so they see exactly the moves `history()`
/// sees, including ones whose `on_enter` then fails. They are the place to
/// forward history to an external recorder instead of keeping it in memory.
pub trait TransitionObserver<S: State, E: Event>: Send {
    fn on_start(&mut self, _initial: &S) {}

    fn on_transition(&mut self, from: &S, to: &S, event: &E);
}

/// Observer that keeps `(from, to, event name)` triples in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub started: Option<String>,
    pub transitions: Vec<(String, String, String)>,
}

impl<S: State, E: Event> TransitionObserver<S, E> for RecordingObserver {
    fn on_start(&mut self, initial: &S) {
        self.started = Some(initial.name().to_string());
    }

    fn on_transition(&mut self, from: &S, to: &S, event: &E) {
        self.transitions.push((
            from.name().to_string(),
            to.name().to_string(),
            event.name().to_string(),
        ));
    }
}

impl<S, E, O> TransitionObserver<S, E> for Arc<Mutex<O>>
where
    S: State,
    E: Event,
    O: TransitionObserver<S, E>,
{
    fn on_start(&mut self, initial: &S) {
        let mut inner = self.lock().unwrap_or_else(PoisonError::into_inner);
        TransitionObserver::<S, E>::on_start(&mut *inner, initial);
    }

    fn on_transition(&mut self, from: &S, to: &S, event: &E) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_transition(from, to, event);
    }
}
