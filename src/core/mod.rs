//! Core state machine types.
//!
//! This module contains the value types the engine is built from:
//! - State and event identities via the `State` and `Event` traits
//! - Guard predicates for transition control
//! - Append-only visit history
//!
//! Nothing here owns a machine; see [`crate::engine`] for that.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, Visit};
pub use state::{Event, State};
