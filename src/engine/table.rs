//! Transition rules and the ordered transition table.

use super::error::{HookResult, MachineError};
use super::registry::StateRegistry;
use crate::core::{Event, Guard, State};
use std::fmt;

/// Which current states a rule applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source<S: State> {
    /// Applies only while the machine is in this state
    Exact(S),
    /// Applies from any current state
    Any,
}

impl<S: State> Source<S> {
    pub fn matches(&self, current: &S) -> bool {
        match self {
            Self::Exact(state) => state == current,
            Self::Any => true,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Exact(state) => state.name(),
            Self::Any => "*",
        }
    }
}

/// Side-effecting callback run between `on_exit` and `on_enter`.
pub type Action = Box<dyn FnMut() -> HookResult + Send>;

/// A registered mapping from (source, event) to a target state.
pub struct TransitionRule<S: State, E: Event> {
    pub source: Source<S>,
    pub target: S,
    pub event: E,
    pub guard: Option<Guard<S>>,
    pub action: Option<Action>,
}

impl<S: State, E: Event> TransitionRule<S, E> {
    pub fn new(source: Source<S>, target: S, event: E) -> Self {
        Self {
            source,
            target,
            event,
            guard: None,
            action: None,
        }
    }

    pub fn with_guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Check whether this rule fires for `event` while in `current`.
    ///
    /// The guard is only consulted once source and event both match.
    pub fn applies(&self, current: &S, event: &E) -> bool {
        self.source.matches(current)
            && self.event == *event
            && self.guard.as_ref().is_none_or(|g| g.check(current))
    }
}

impl<S: State, E: Event> fmt::Debug for TransitionRule<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("event", &self.event)
            .field("guarded", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Rules in registration order.
///
/// Resolution is first match in insertion order. Exact-source rules get no
/// priority over wildcard rules: register the more specific rule first when
/// precedence matters. A rule whose guard rejects stops nothing; the scan
/// simply moves on to the next rule.
pub struct TransitionTable<S: State, E: Event> {
    rules: Vec<TransitionRule<S, E>>,
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after checking that its states are registered.
    pub fn push(
        &mut self,
        rule: TransitionRule<S, E>,
        registry: &StateRegistry<S, E>,
    ) -> Result<(), MachineError> {
        registry.ensure(&rule.target)?;
        if let Source::Exact(source) = &rule.source {
            registry.ensure(source)?;
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Index of the first rule that fires for `event` from `current`.
    pub fn resolve(&self, current: &S, event: &E) -> Option<usize> {
        self.rules.iter().position(|rule| rule.applies(current, event))
    }

    pub fn get(&self, index: usize) -> Option<&TransitionRule<S, E>> {
        self.rules.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TransitionRule<S, E>> {
        self.rules.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionRule<S, E>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<S: State, E: Event> Default for TransitionTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
