//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, State};
use crate::engine::{Action, HookResult, Source, TransitionRule};

/// Builder for constructing transition rules with a fluent API.
pub struct TransitionBuilder<S: State, E: Event> {
    source: Option<Source<S>>,
    target: Option<S>,
    event: Option<E>,
    guard: Option<Guard<S>>,
    action: Option<Action>,
}

impl<S: State, E: Event> TransitionBuilder<S, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            source: None,
            target: None,
            event: None,
            guard: None,
            action: None,
        }
    }

    /// Set an exact source state.
    pub fn from(mut self, state: S) -> Self {
        self.source = Some(Source::Exact(state));
        self
    }

    /// Make the rule apply from any current state.
    pub fn from_any(mut self) -> Self {
        self.source = Some(Source::Any);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action run between exit and enter (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Build the rule.
    ///
    /// Only checks that the rule is complete; whether its states are
    /// registered is checked when it is added to a machine.
    pub fn build(self) -> Result<TransitionRule<S, E>, BuildError> {
        let source = self.source.ok_or(BuildError::MissingSource)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;

        Ok(TransitionRule {
            source,
            target,
            event,
            guard: self.guard,
            action: self.action,
        })
    }
}

impl<S: State, E: Event> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Builder = TransitionBuilder<&'static str, &'static str>;

    #[test]
    fn builder_validates_required_fields() {
        assert!(matches!(Builder::new().to("B").on("GO").build(), Err(BuildError::MissingSource)));
        assert!(matches!(Builder::new().from("A").on("GO").build(), Err(BuildError::MissingTarget)));
        assert!(matches!(Builder::new().from("A").to("B").build(), Err(BuildError::MissingEvent)));
    }

    #[test]
    fn transition_builder_with_guard() {
        let rule = Builder::new()
            .from("A")
            .to("B")
            .on("GO")
            .when(|s| *s == "A")
            .build()
            .unwrap();

        assert!(rule.applies(&"A", &"GO"));
        assert!(!rule.applies(&"A", &"STOP"));
        assert!(!rule.applies(&"C", &"GO"));
    }

    #[test]
    fn from_any_builds_wildcard() {
        let rule = Builder::new().from_any().to("SAFE").on("PANIC").build().unwrap();

        assert_eq!(rule.source, Source::Any);
        assert!(rule.applies(&"whatever", &"PANIC"));
    }

    #[test]
    fn action_is_attached() {
        let rule = Builder::new()
            .from("A")
            .to("B")
            .on("GO")
            .action(|| Ok(()))
            .build()
            .unwrap();

        assert!(rule.action.is_some());
        assert!(rule.guard.is_none());
    }
}
