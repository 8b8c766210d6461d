//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders, rule helpers and macros for
//! assembling machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, State};
use crate::engine::{Source, TransitionRule};

/// Create an unguarded rule from `from` to `to` on `event`.
///
/// # Example
///
/// ```
/// use junction::builder::simple_transition;
///
/// let rule = simple_transition("RED", "GREEN", "TICK");
/// assert!(rule.applies(&"RED", &"TICK"));
/// ```
pub fn simple_transition<S: State, E: Event>(from: S, to: S, event: E) -> TransitionRule<S, E> {
    TransitionRule::new(Source::Exact(from), to, event)
}

/// Create a rule gated by a guard predicate.
///
/// # Example
///
/// ```
/// use junction::builder::guarded_transition;
///
/// let rule = guarded_transition("A", "B", "GO", |_| false);
/// assert!(!rule.applies(&"A", &"GO"));
/// ```
pub fn guarded_transition<S, E, F>(from: S, to: S, event: E, guard: F) -> TransitionRule<S, E>
where
    S: State,
    E: Event,
    F: Fn(&S) -> bool + Send + Sync + 'static,
{
    simple_transition(from, to, event).with_guard(Guard::new(guard))
}

/// Create a rule that applies from any current state.
///
/// # Example
///
/// ```
/// use junction::builder::wildcard_transition;
///
/// let rule = wildcard_transition("SAFE", "PANIC");
/// assert!(rule.applies(&"GREEN", &"PANIC"));
/// assert!(rule.applies(&"YELLOW", &"PANIC"));
/// ```
pub fn wildcard_transition<S: State, E: Event>(to: S, event: E) -> TransitionRule<S, E> {
    TransitionRule::new(Source::Any, to, event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_transition_builds() {
        let rule = simple_transition("Start", "Middle", "go");

        assert_eq!(rule.source, Source::Exact("Start"));
        assert_eq!(rule.target, "Middle");
        assert!(rule.applies(&"Start", &"go"));
        assert!(!rule.applies(&"Middle", &"go"));
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let rule = guarded_transition("Start", "Middle", "go", |s| *s == "Start");

        assert!(rule.applies(&"Start", &"go"));
        assert!(rule.guard.is_some());
    }

    #[test]
    fn wildcard_transition_has_any_source() {
        let rule = wildcard_transition("Safe", "panic");

        assert_eq!(rule.source, Source::Any);
        assert!(rule.applies(&"Start", &"panic"));
    }
}
