//! Signal states and events shared by every intersection axis.

use crate::core::State;
use crate::{event_enum, state_enum};
use std::str::FromStr;
use thiserror::Error;

state_enum! {
    /// Aspect shown by one axis of an intersection.
    pub enum Signal {
        Red,
        Green,
        Yellow,
        /// Safe state forced by an emergency
        FlashingRed,
    }
}

event_enum! {
    /// Events understood by an intersection axis.
    pub enum SignalEvent {
        /// Move to the next aspect of the cycle
        Advance,
        /// Force the safe state from anywhere
        Emergency,
        /// Leave the safe state
        Clear,
    }
}

impl Signal {
    pub const ALL: [Signal; 4] = [
        Signal::Red,
        Signal::Green,
        Signal::Yellow,
        Signal::FlashingRed,
    ];

    /// Whether traffic on this axis may be moving.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Green | Self::Yellow)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown signal '{0}'")]
pub struct UnknownSignal(pub String);

impl FromStr for Signal {
    type Err = UnknownSignal;

    /// Parse a signal from its state name; upper-case aliases such as
    /// `RED` or `FLASHING_RED` are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .into_iter()
            .find(|signal| {
                signal.name() == s || signal.name().to_ascii_uppercase() == s.replace('_', "")
            })
            .ok_or_else(|| UnknownSignal(s.to_string()))
    }
}
