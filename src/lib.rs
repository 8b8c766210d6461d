//! Junction: a small finite state machine runtime.
//!
//! Machines register named states and event-triggered transition rules,
//! then are driven by an external event source (`trigger`) and an external
//! time source (`update`). Several machines can be composed so that the
//! guards of one read the current state of another.
//!
//! # Core Concepts
//!
//! - **State / Event**: identities via the `State` and `Event` traits
//! - **Guards**: side-effect-free predicates gating a rule
//! - **Rules**: `(source | any, event) -> target`, resolved first-match in
//!   registration order
//! - **Behaviors**: per-state `on_enter` / `on_exit` / `on_update` hooks
//! - **Coordinator**: machines constraining each other through probes
//!
//! # Example
//!
//! ```rust
//! use junction::builder::{simple_transition, wildcard_transition, StateMachineBuilder};
//!
//! let mut machine = StateMachineBuilder::new()
//!     .label("light")
//!     .states(["RED", "GREEN", "YELLOW", "SAFE"])
//!     .add_transition(wildcard_transition("SAFE", "PANIC"))
//!     .add_transition(simple_transition("RED", "GREEN", "TICK"))
//!     .add_transition(simple_transition("GREEN", "YELLOW", "TICK"))
//!     .initial("RED")
//!     .build()
//!     .unwrap();
//!
//! assert!(machine.trigger(&"TICK").unwrap());
//! assert!(!machine.trigger(&"HONK").unwrap());
//! assert!(machine.trigger(&"PANIC").unwrap());
//! assert_eq!(machine.history(), vec!["RED", "GREEN", "SAFE"]);
//! ```

pub mod behaviors;
pub mod builder;
pub mod coordinator;
pub mod core;
pub mod decision;
pub mod engine;

// Re-export commonly used types
pub use self::core::{Event, Guard, State, StateHistory, Visit};
pub use engine::{MachineError, StateMachine, StateProbe, TransitionRule};
