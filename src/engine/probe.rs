//! Read-only handles onto a machine's current state.

use super::error::MachineError;
use crate::core::State;
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable read-only view of one machine's current state.
///
/// A probe is how a guard on one machine observes another: it never owns
/// the peer and cannot mutate it. The owning machine publishes every state
/// change into the probe before running the new state's `on_enter`.
#[derive(Clone, Debug)]
pub struct StateProbe<S: State> {
    machine: Arc<str>,
    current: Arc<RwLock<Option<S>>>,
}

impl<S: State> StateProbe<S> {
    pub(crate) fn new(machine: &str) -> Self {
        Self {
            machine: Arc::from(machine),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Current state of the observed machine.
    ///
    /// Fails with `NotStarted` until the machine has been started; guards
    /// are expected to handle that case themselves.
    pub fn current(&self) -> Result<S, MachineError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| MachineError::NotStarted {
                machine: self.machine.to_string(),
            })
    }

    /// Label of the observed machine.
    pub fn machine(&self) -> &str {
        &self.machine
    }

    pub(crate) fn publish(&self, state: S) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpublished_probe_reports_not_started() {
        let probe: StateProbe<&'static str> = StateProbe::new("east-west");

        let err = probe.current().unwrap_err();

        assert!(err.is_not_started());
        assert_eq!(err.to_string(), "Machine 'east-west' has not been started");
    }

    #[test]
    fn clones_observe_published_state() {
        let probe = StateProbe::new("m");
        let reader = probe.clone();

        probe.publish("RED");
        assert_eq!(reader.current().unwrap(), "RED");

        probe.publish("GREEN");
        assert_eq!(reader.current().unwrap(), "GREEN");
        assert_eq!(reader.machine(), "m");
    }
}
