//! The synchronous machine engine.
//!
//! # Key Concepts
//!
//! - **Registry**: the named states of one machine and their behaviors
//! - **Table**: transition rules resolved first-match in insertion order
//! - **Machine**: owns the current state, runs exit/action/enter, keeps history
//! - **Probe**: read-only view of a machine for guards on other machines
//!
//! The engine spawns no threads and owns no timers. Time enters only
//! through [`StateMachine::update`].

mod config;
mod error;
mod machine;
mod observer;
mod probe;
mod registry;
mod shared;
mod table;

pub use config::{LogLevel, MachineConfig};
pub use error::{HookError, HookKind, HookResult, MachineError};
pub use machine::StateMachine;
pub use observer::{RecordingObserver, TransitionObserver};
pub use probe::StateProbe;
pub use registry::{Behavior, Hooks, StateRegistry};
pub use shared::SharedMachine;
pub use table::{Action, Source, TransitionRule, TransitionTable};
