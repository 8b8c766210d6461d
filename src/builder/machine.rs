//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State};
use crate::engine::{
    Behavior, LogLevel, MachineConfig, StateMachine, TransitionObserver, TransitionRule,
};

/// Builder for constructing state machines with a fluent API.
///
/// States are registered before rules, in the order given, so every
/// registration error surfaces from `build`.
pub struct StateMachineBuilder<S: State, E: Event> {
    config: MachineConfig,
    initial: Option<S>,
    states: Vec<(S, Option<Box<dyn Behavior<E>>>)>,
    transitions: Vec<TransitionRule<S, E>>,
    observers: Vec<Box<dyn TransitionObserver<S, E>>>,
}

impl<S: State, E: Event> StateMachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the built machine in this state (optional).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn state(mut self, state: S) -> Self {
        self.states.push((state, None));
        self
    }

    /// Register several states without behavior.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(states.into_iter().map(|s| (s, None)));
        self
    }

    pub fn state_with<B>(mut self, state: S, behavior: B) -> Self
    where
        B: Behavior<E> + 'static,
    {
        self.states.push((state, Some(Box::new(behavior))));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.transitions.push(rule);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, rule: TransitionRule<S, E>) -> Self {
        self.transitions.push(rule);
        self
    }

    /// Add multiple transitions at once, keeping their order.
    pub fn transitions(mut self, rules: Vec<TransitionRule<S, E>>) -> Self {
        self.transitions.extend(rules);
        self
    }

    pub fn observer<O>(mut self, observer: O) -> Self
    where
        O: TransitionObserver<S, E> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the machine, starting it if an initial state was given.
    pub fn build(self) -> Result<StateMachine<S, E>, BuildError> {
        let mut machine = StateMachine::with_config(self.config);
        for (state, behavior) in self.states {
            machine.add_state_boxed(state, behavior)?;
        }
        for rule in self.transitions {
            machine.add_transition(rule)?;
        }
        for observer in self.observers {
            machine.add_observer_boxed(observer);
        }
        if let Some(initial) = self.initial {
            machine.start(initial)?;
        }
        Ok(machine)
    }
}

impl<S: State, E: Event> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
