//! Reusable state behaviors.

mod countdown;

pub use countdown::Countdown;
