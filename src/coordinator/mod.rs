//! Composition of several machines that constrain each other.
//!
//! The reference composition is a two-axis intersection: each axis is its
//! own machine, guards read the other axis through a
//! [`StateProbe`](crate::engine::StateProbe), and emergency overrides are
//! broadcast to every axis in a fixed order.

mod config;
mod intersection;
mod scheduler;
mod signal;

pub use config::{ConfigError, IntersectionConfig};
pub use intersection::{peer_allows_green, Axis, Intersection, IntersectionError};
pub use scheduler::DeferredQueue;
pub use signal::{Signal, SignalEvent, UnknownSignal};
