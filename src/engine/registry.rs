//! State registry and per-state behaviors.

use super::error::{HookError, HookResult, MachineError};
use crate::core::{Event, State};
use std::collections::HashMap;
use std::time::Duration;

/// Lifecycle behavior attached to one registered state.
///
/// All methods default to no-ops. `on_update` requests a transition by
/// returning the event to trigger; the machine triggers it once the hook
/// has returned. Errors are never swallowed by the engine.
pub trait Behavior<E: Event>: Send {
    fn on_enter(&mut self) -> HookResult {
        Ok(())
    }

    fn on_exit(&mut self) -> HookResult {
        Ok(())
    }

    fn on_update(&mut self, _delta: Duration) -> Result<Option<E>, HookError> {
        Ok(None)
    }
}

type EnterFn = Box<dyn FnMut() -> HookResult + Send>;
type UpdateFn<E> = Box<dyn FnMut(Duration) -> Result<Option<E>, HookError> + Send>;

/// Behavior assembled from closures.
///
/// # Example
///
/// ```rust
/// use junction::engine::{Behavior, Hooks};
///
/// let mut hooks: Hooks<&'static str> = Hooks::new().on_enter(|| {
///     println!("lamp on");
///     Ok(())
/// });
/// assert!(Behavior::on_enter(&mut hooks).is_ok());
/// ```
pub struct Hooks<E: Event> {
    enter: Option<EnterFn>,
    exit: Option<EnterFn>,
    update: Option<UpdateFn<E>>,
}

impl<E: Event> Hooks<E> {
    pub fn new() -> Self {
        Self {
            enter: None,
            exit: None,
            update: None,
        }
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.enter = Some(Box::new(f));
        self
    }

    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.exit = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(Duration) -> Result<Option<E>, HookError> + Send + 'static,
    {
        self.update = Some(Box::new(f));
        self
    }
}

impl<E: Event> Default for Hooks<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Behavior<E> for Hooks<E> {
    fn on_enter(&mut self) -> HookResult {
        self.enter.as_mut().map_or(Ok(()), |f| f())
    }

    fn on_exit(&mut self) -> HookResult {
        self.exit.as_mut().map_or(Ok(()), |f| f())
    }

    fn on_update(&mut self, delta: Duration) -> Result<Option<E>, HookError> {
        self.update.as_mut().map_or(Ok(None), |f| f(delta))
    }
}

/// The set of named states of one machine, each mapped to its optional
/// behavior.
pub struct StateRegistry<S: State, E: Event> {
    states: HashMap<S, Option<Box<dyn Behavior<E>>>>,
}

impl<S: State, E: Event> StateRegistry<S, E> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Register a state. Fails if the name is empty or already taken.
    ///
    /// Identity is the name: two distinct values reporting the same
    /// `name()` are duplicates.
    pub fn register(
        &mut self,
        state: S,
        behavior: Option<Box<dyn Behavior<E>>>,
    ) -> Result<(), MachineError> {
        if state.name().is_empty() {
            return Err(MachineError::EmptyStateName);
        }
        if self.states.keys().any(|known| known.name() == state.name()) {
            return Err(MachineError::DuplicateState {
                state: state.name().to_string(),
            });
        }
        self.states.insert(state, behavior);
        Ok(())
    }

    pub fn contains(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    /// Fails with `UnknownState` unless `state` is registered.
    pub fn ensure(&self, state: &S) -> Result<(), MachineError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(MachineError::UnknownState {
                state: state.name().to_string(),
            })
        }
    }

    pub fn behavior_mut(&mut self, state: &S) -> Option<&mut (dyn Behavior<E> + 'static)> {
        self.states.get_mut(state).and_then(|b| b.as_deref_mut())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S: State, E: Event> Default for StateRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
