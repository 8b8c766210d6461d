//! Build errors for machine and transition builders.

use crate::engine::MachineError;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source not specified. Call .from(state) or .from_any()")]
    MissingSource,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingTarget,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error(transparent)]
    Machine(#[from] MachineError),
}
