//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions that determine whether a matching rule may
//! fire. They are evaluated during rule resolution and must only read.

use super::state::State;
use std::fmt;

/// Predicate that determines if a transition can execute.
///
/// The predicate receives the machine's current state. Guards that depend
/// on other machines read them through a [`StateProbe`](crate::engine::StateProbe)
/// captured in the closure.
///
/// # Example
///
/// ```rust
/// use junction::core::Guard;
///
/// let only_from_red = Guard::new(|s: &&'static str| *s == "RED");
///
/// assert!(only_from_red.check(&"RED"));
/// assert!(!only_from_red.check(&"GREEN"));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a predicate function.
    ///
    /// The predicate must be free of observable side effects: the machine
    /// may evaluate it for rules that end up not firing.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows a transition out of `state`.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::new(|s: &&'static str| *s == "Initial");

        assert!(guard.check(&"Initial"));
        assert!(!guard.check(&"Processing"));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|s: &&'static str| s.starts_with('P'));

        let result1 = guard.check(&"Processing");
        let result2 = guard.check(&"Processing");

        assert_eq!(result1, result2);
    }

    #[test]
    fn guard_can_read_external_flag() {
        let open = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&open);
        let guard = Guard::new(move |_: &&'static str| flag.load(Ordering::SeqCst));

        assert!(!guard.check(&"A"));
        open.store(true, Ordering::SeqCst);
        assert!(guard.check(&"A"));
    }
}
