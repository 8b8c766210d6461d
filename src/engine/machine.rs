//! The machine core: start, trigger and update against a registry and table.

use super::config::{LogLevel, MachineConfig};
use super::error::{HookKind, MachineError};
use super::observer::TransitionObserver;
use super::probe::StateProbe;
use super::registry::{Behavior, StateRegistry};
use super::table::{TransitionRule, TransitionTable};
use crate::core::{Event, State, StateHistory, Visit};
use std::time::Duration;
use uuid::Uuid;

/// Emit a tracing event at the machine's configured level.
macro_rules! emit {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Off => {}
            LogLevel::Trace => tracing::trace!($($arg)+),
            LogLevel::Debug => tracing::debug!($($arg)+),
            LogLevel::Info => tracing::info!($($arg)+),
        }
    };
}

/// A single finite state machine instance.
///
/// The machine is either not started or has exactly one current state.
/// `start` moves it to started; there is no way back. Every call runs to
/// completion before returning.
///
/// # Resolution order
///
/// `trigger` picks the **first** registered rule whose source matches the
/// current state (or is [`Source::Any`](super::Source::Any)), whose event
/// equals the triggered event and whose guard, if any, passes. Exact rules
/// are *not* preferred over wildcard rules: register specific rules first
/// when precedence matters.
///
/// # Example
///
/// ```rust
/// use junction::builder::simple_transition;
/// use junction::engine::StateMachine;
///
/// let mut machine = StateMachine::new("light");
/// for state in ["RED", "GREEN", "YELLOW"] {
///     machine.add_state(state).unwrap();
/// }
/// machine.add_transition(simple_transition("RED", "GREEN", "TICK")).unwrap();
/// machine.add_transition(simple_transition("GREEN", "YELLOW", "TICK")).unwrap();
/// machine.add_transition(simple_transition("YELLOW", "RED", "TICK")).unwrap();
///
/// machine.start("RED").unwrap();
/// for _ in 0..3 {
///     assert!(machine.trigger(&"TICK").unwrap());
/// }
/// assert_eq!(machine.history(), vec!["RED", "GREEN", "YELLOW", "RED"]);
/// ```
pub struct StateMachine<S: State, E: Event> {
    id: Uuid,
    config: MachineConfig,
    registry: StateRegistry<S, E>,
    table: TransitionTable<S, E>,
    current: Option<S>,
    history: StateHistory<S>,
    probe: StateProbe<S>,
    observers: Vec<Box<dyn TransitionObserver<S, E>>>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Create an unstarted machine with default configuration.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_config(MachineConfig::labeled(label))
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            registry: StateRegistry::new(),
            table: TransitionTable::new(),
            current: None,
            history: StateHistory::with_limit(config.history_limit),
            probe: StateProbe::new(&config.label),
            observers: Vec::new(),
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Register a state without behavior.
    pub fn add_state(&mut self, state: S) -> Result<(), MachineError> {
        self.registry.register(state, None)
    }

    /// Register a state with its lifecycle behavior.
    pub fn add_state_with<B>(&mut self, state: S, behavior: B) -> Result<(), MachineError>
    where
        B: Behavior<E> + 'static,
    {
        self.registry.register(state, Some(Box::new(behavior)))
    }

    pub(crate) fn add_state_boxed(
        &mut self,
        state: S,
        behavior: Option<Box<dyn Behavior<E>>>,
    ) -> Result<(), MachineError> {
        self.registry.register(state, behavior)
    }

    /// Append a rule. Its target, and its source unless wildcard, must
    /// already be registered.
    pub fn add_transition(&mut self, rule: TransitionRule<S, E>) -> Result<(), MachineError> {
        self.table.push(rule, &self.registry)
    }

    /// Attach a transition sink.
    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: TransitionObserver<S, E> + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub(crate) fn add_observer_boxed(&mut self, observer: Box<dyn TransitionObserver<S, E>>) {
        self.observers.push(observer);
    }

    /// Enter the initial state.
    ///
    /// A failing `on_enter` is returned as a hook fault; the machine is
    /// considered started regardless and observers have already seen the
    /// start.
    pub fn start(&mut self, initial: S) -> Result<(), MachineError> {
        if let Some(current) = &self.current {
            return Err(MachineError::AlreadyStarted {
                machine: self.config.label.clone(),
                current: current.name().to_string(),
            });
        }
        self.registry.ensure(&initial)?;

        emit!(
            self.config.log_level,
            machine = %self.config.label,
            id = %self.id,
            state = initial.name(),
            "machine started"
        );
        self.commit(Visit::initial(initial.clone()));
        for observer in &mut self.observers {
            observer.on_start(&initial);
        }
        self.run_enter(&initial)
    }

    /// Fire an event.
    ///
    /// Returns `Ok(true)` if a rule fired and `Ok(false)` if none matched.
    /// A fired rule runs `on_exit` of the departing state, then the rule's
    /// action, then `on_enter` of the target, strictly in that order.
    pub fn trigger(&mut self, event: &E) -> Result<bool, MachineError> {
        let from = self.current.clone().ok_or_else(|| self.not_started())?;

        let Some(index) = self.table.resolve(&from, event) else {
            emit!(
                self.config.log_level,
                machine = %self.config.label,
                state = from.name(),
                event = event.name(),
                "no transition"
            );
            return Ok(false);
        };

        let target = match self.table.get(index) {
            Some(rule) => rule.target.clone(),
            None => return Ok(false),
        };

        if let Some(behavior) = self.registry.behavior_mut(&from) {
            behavior.on_exit().map_err(|source| MachineError::Hook {
                state: from.name().to_string(),
                hook: HookKind::Exit,
                source,
            })?;
        }

        if let Some(action) = self.table.get_mut(index).and_then(|r| r.action.as_mut()) {
            action().map_err(|source| MachineError::Action {
                from: from.name().to_string(),
                to: target.name().to_string(),
                source,
            })?;
        }

        emit!(
            self.config.log_level,
            machine = %self.config.label,
            from = from.name(),
            to = target.name(),
            event = event.name(),
            "transition"
        );
        self.commit(Visit::via(target.clone(), event.name()));
        for observer in &mut self.observers {
            observer.on_transition(&from, &target, event);
        }
        self.run_enter(&target)?;
        Ok(true)
    }

    /// Advance time for the current state.
    ///
    /// Runs `on_update` of the current state. If the hook requests an event,
    /// that event is triggered before returning. `delta` is passed through
    /// unvalidated.
    pub fn update(&mut self, delta: Duration) -> Result<(), MachineError> {
        let current = self.current.clone().ok_or_else(|| self.not_started())?;

        let requested = match self.registry.behavior_mut(&current) {
            Some(behavior) => behavior.on_update(delta).map_err(|source| MachineError::Hook {
                state: current.name().to_string(),
                hook: HookKind::Update,
                source,
            })?,
            None => None,
        };

        if let Some(event) = requested {
            let fired = self.trigger(&event)?;
            if !fired {
                emit!(
                    self.config.log_level,
                    machine = %self.config.label,
                    state = current.name(),
                    event = event.name(),
                    "requested transition was not taken"
                );
            }
        }
        Ok(())
    }

    /// Whether `trigger(event)` would fire a rule right now.
    ///
    /// Evaluates guards but runs no hooks or actions. Returns `false` if
    /// the machine has not been started.
    pub fn can_transition(&self, event: &E) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| self.table.resolve(current, event).is_some())
    }

    pub fn current_state(&self) -> Result<&S, MachineError> {
        self.current.as_ref().ok_or_else(|| self.not_started())
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// Visited states, oldest first, as an independent copy.
    pub fn history(&self) -> Vec<S> {
        self.history.get_path()
    }

    pub fn history_names(&self) -> Vec<String> {
        self.history.names()
    }

    /// Full visit log including timestamps and triggering events.
    pub fn visits(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Read-only handle for guards on other machines.
    pub fn probe(&self) -> StateProbe<S> {
        self.probe.clone()
    }

    pub fn state_count(&self) -> usize {
        self.registry.len()
    }

    pub fn transition_count(&self) -> usize {
        self.table.len()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRule<S, E>> {
        self.table.iter()
    }

    /// Point the machine at the visited state. Observers are notified
    /// between this and `run_enter`.
    fn commit(&mut self, visit: Visit<S>) {
        self.current = Some(visit.state.clone());
        self.probe.publish(visit.state.clone());
        self.history.record(visit);
    }

    fn run_enter(&mut self, state: &S) -> Result<(), MachineError> {
        if let Some(behavior) = self.registry.behavior_mut(state) {
            behavior.on_enter().map_err(|source| MachineError::Hook {
                state: state.name().to_string(),
                hook: HookKind::Enter,
                source,
            })?;
        }
        Ok(())
    }

    fn not_started(&self) -> MachineError {
        MachineError::NotStarted {
            machine: self.config.label.clone(),
        }
    }
}
