//! Engine error types.

use std::fmt;
use thiserror::Error;

/// Error raised by a lifecycle hook or transition action.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a lifecycle hook or transition action.
pub type HookResult = Result<(), HookError>;

/// Which lifecycle hook raised a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Enter,
    Exit,
    Update,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("on_enter"),
            Self::Exit => f.write_str("on_exit"),
            Self::Update => f.write_str("on_update"),
        }
    }
}

/// Errors raised at the point of an illegal engine call, plus the wrappers
/// that carry hook faults back to the caller.
///
/// A trigger that matches no rule is not an error; it returns `Ok(false)`.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("State '{state}' is already registered")]
    DuplicateState { state: String },

    #[error("State '{state}' is not registered")]
    UnknownState { state: String },

    #[error("State names must be non-empty")]
    EmptyStateName,

    #[error("Machine '{machine}' has not been started")]
    NotStarted { machine: String },

    #[error("Machine '{machine}' is already started in state '{current}'")]
    AlreadyStarted { machine: String, current: String },

    #[error("{hook} hook of state '{state}' failed")]
    Hook {
        state: String,
        hook: HookKind,
        #[source]
        source: HookError,
    },

    #[error("Action for transition '{from}' -> '{to}' failed")]
    Action {
        from: String,
        to: String,
        #[source]
        source: HookError,
    },
}

impl MachineError {
    /// True for the `NotStarted` variant.
    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_offending_state() {
        let err = MachineError::DuplicateState {
            state: "RED".to_string(),
        };
        assert_eq!(err.to_string(), "State 'RED' is already registered");
    }

    #[test]
    fn hook_fault_keeps_its_source() {
        let err = MachineError::Hook {
            state: "GREEN".to_string(),
            hook: HookKind::Enter,
            source: "lamp failure".into(),
        };

        assert_eq!(err.to_string(), "on_enter hook of state 'GREEN' failed");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("lamp failure"));
    }

    #[test]
    fn not_started_is_detectable() {
        let err = MachineError::NotStarted {
            machine: "m".to_string(),
        };
        assert!(err.is_not_started());
        assert!(!MachineError::EmptyStateName.is_not_started());
    }
}
