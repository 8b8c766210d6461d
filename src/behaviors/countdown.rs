//! Time-based state behavior.

use crate::core::Event;
use crate::engine::{Behavior, HookError, HookResult};
use std::time::Duration;

/// Requests an event once the state has been occupied for a threshold.
///
/// Elapsed time and the request count are reset on every entry. Once
/// `elapsed >= threshold` the event is requested on each tick until
/// `max_requests` requests have been made for this entry, so a trigger
/// that the machine rejects is not retried without bound.
///
/// # Example
///
/// ```rust
/// use junction::behaviors::Countdown;
/// use junction::builder::simple_transition;
/// use junction::engine::StateMachine;
/// use std::time::Duration;
///
/// let mut machine = StateMachine::new("walk-signal");
/// machine
///     .add_state_with("WALK", Countdown::new(Duration::from_secs(10), "EXPIRED"))
///     .unwrap();
/// machine.add_state("DONT_WALK").unwrap();
/// machine
///     .add_transition(simple_transition("WALK", "DONT_WALK", "EXPIRED"))
///     .unwrap();
/// machine.start("WALK").unwrap();
///
/// machine.update(Duration::from_secs(6)).unwrap();
/// assert_eq!(*machine.current_state().unwrap(), "WALK");
/// machine.update(Duration::from_secs(4)).unwrap();
/// assert_eq!(*machine.current_state().unwrap(), "DONT_WALK");
/// ```
#[derive(Clone, Debug)]
pub struct Countdown<E: Event> {
    threshold: Duration,
    event: E,
    elapsed: Duration,
    requests: u32,
    max_requests: u32,
}

impl<E: Event> Countdown<E> {
    pub fn new(threshold: Duration, event: E) -> Self {
        Self {
            threshold,
            event,
            elapsed: Duration::ZERO,
            requests: 0,
            max_requests: 1,
        }
    }

    /// Allow up to `max` requests per entry when earlier ones are rejected.
    pub fn with_max_requests(mut self, max: u32) -> Self {
        self.max_requests = max;
        self
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Duration {
        self.threshold.saturating_sub(self.elapsed)
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }
}

impl<E: Event> Behavior<E> for Countdown<E> {
    fn on_enter(&mut self) -> HookResult {
        self.elapsed = Duration::ZERO;
        self.requests = 0;
        Ok(())
    }

    fn on_update(&mut self, delta: Duration) -> Result<Option<E>, HookError> {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed < self.threshold || self.requests >= self.max_requests {
            return Ok(None);
        }
        self.requests += 1;
        Ok(Some(self.event.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_once_threshold_is_reached() {
        let mut countdown = Countdown::new(Duration::from_secs(3), "DONE");
        countdown.on_enter().unwrap();

        assert_eq!(countdown.on_update(Duration::from_secs(2)).unwrap(), None);
        assert_eq!(countdown.remaining(), Duration::from_secs(1));
        assert_eq!(countdown.on_update(Duration::from_secs(1)).unwrap(), Some("DONE"));
    }

    #[test]
    fn does_not_request_again_after_cap() {
        let mut countdown = Countdown::new(Duration::from_secs(1), "DONE");
        countdown.on_enter().unwrap();

        assert!(countdown.on_update(Duration::from_secs(5)).unwrap().is_some());
        for _ in 0..10 {
            assert_eq!(countdown.on_update(Duration::from_secs(1)).unwrap(), None);
        }
        assert_eq!(countdown.requests(), 1);
    }

    #[test]
    fn retries_up_to_configured_cap() {
        let mut countdown = Countdown::new(Duration::ZERO, "DONE").with_max_requests(3);
        countdown.on_enter().unwrap();

        let requested = (0..10)
            .filter_map(|_| countdown.on_update(Duration::from_millis(100)).unwrap())
            .count();

        assert_eq!(requested, 3);
    }

    #[test]
    fn enter_resets_counters() {
        let mut countdown = Countdown::new(Duration::from_secs(2), "DONE");
        countdown.on_enter().unwrap();
        countdown.on_update(Duration::from_secs(5)).unwrap();

        countdown.on_enter().unwrap();

        assert_eq!(countdown.elapsed(), Duration::ZERO);
        assert_eq!(countdown.requests(), 0);
        assert_eq!(countdown.threshold(), Duration::from_secs(2));
    }
}
