//! Core traits for state and event identities.
//!
//! A machine is generic over the type of its states and the type of its
//! events. Both are identified by name for logging and error reporting.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are plain identity values: the behavior attached to a state lives
/// in the machine's registry, not on the value itself. Names are
/// case-sensitive and must be non-empty to be registered.
///
/// # Example
///
/// ```rust
/// use junction::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for events that drive transitions.
///
/// Events are compared by equality when a rule is matched.
pub trait Event: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Event for &'static str {
    fn name(&self) -> &str {
        self
    }
}
