//! Two cross-traffic axes coordinated through guards.
//!
//! Each axis is an independent [`StateMachine`]. The only coupling is:
//! - the `Red -> Green` rule of one axis is guarded by a probe of the other
//! - the `Yellow -> Red` action of one axis schedules a deferred `Advance`
//!   for the other after the all-red clearance
//! - emergency and clear events are broadcast to both axes in a fixed order
//!
//! No lock spans both machines. The "never both active" invariant holds
//! because entering `Green` is the only way to become active and its guard
//! requires the peer to be `Red`.

use super::config::{ConfigError, IntersectionConfig};
use super::scheduler::DeferredQueue;
use super::signal::{Signal, SignalEvent};
use crate::behaviors::Countdown;
use crate::builder::{simple_transition, wildcard_transition};
use crate::core::{Event, Guard};
use crate::engine::{MachineConfig, MachineError, StateMachine, StateProbe, TransitionRule};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// One direction of traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

impl Axis {
    /// Broadcast and update order.
    pub const ALL: [Axis; 2] = [Axis::NorthSouth, Axis::EastWest];

    pub fn peer(self) -> Axis {
        match self {
            Self::NorthSouth => Self::EastWest,
            Self::EastWest => Self::NorthSouth,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NorthSouth => "north-south",
            Self::EastWest => "east-west",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum IntersectionError {
    #[error("Invalid intersection config: {0:?}")]
    InvalidConfig(Vec<ConfigError>),

    #[error(transparent)]
    Machine(#[from] MachineError),
}

type SignalMachine = StateMachine<Signal, SignalEvent>;

/// Coordinator owning one machine per axis.
///
/// # Example
///
/// ```rust
/// use junction::coordinator::{Axis, Intersection, IntersectionConfig, Signal};
/// use std::time::Duration;
///
/// let mut intersection = Intersection::new(IntersectionConfig::default()).unwrap();
/// intersection.start().unwrap();
/// assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Green);
/// assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Red);
///
/// for _ in 0..40 {
///     intersection.tick(Duration::from_secs(1)).unwrap();
///     assert!(intersection.is_safe());
/// }
/// assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Green);
/// ```
pub struct Intersection {
    config: IntersectionConfig,
    north_south: SignalMachine,
    east_west: SignalMachine,
    deferred: DeferredQueue<Axis, SignalEvent>,
}

impl Intersection {
    pub fn new(config: IntersectionConfig) -> Result<Self, IntersectionError> {
        let errors = config.errors();
        if !errors.is_empty() {
            return Err(IntersectionError::InvalidConfig(errors));
        }

        let deferred = DeferredQueue::new();
        let mut north_south = axis_machine(Axis::NorthSouth, &config)?;
        let mut east_west = axis_machine(Axis::EastWest, &config)?;

        let ns_probe = north_south.probe();
        let ew_probe = east_west.probe();
        install_rules(&mut north_south, Axis::NorthSouth, ew_probe, &deferred, config.all_red())?;
        install_rules(&mut east_west, Axis::EastWest, ns_probe, &deferred, config.all_red())?;

        Ok(Self {
            config,
            north_south,
            east_west,
            deferred,
        })
    }

    pub fn config(&self) -> &IntersectionConfig {
        &self.config
    }

    /// Start both axes at red and give north-south the first green.
    pub fn start(&mut self) -> Result<(), IntersectionError> {
        for axis in Axis::ALL {
            self.machine_mut(axis).start(Signal::Red)?;
        }
        self.north_south.trigger(&SignalEvent::Advance)?;
        tracing::info!(
            north_south = %self.north_south.id(),
            east_west = %self.east_west.id(),
            "intersection started"
        );
        Ok(())
    }

    /// Advance time by one tick.
    ///
    /// Handoffs that have come due are delivered first, then each axis is
    /// updated in [`Axis::ALL`] order.
    pub fn tick(&mut self, delta: Duration) -> Result<(), IntersectionError> {
        for (axis, event) in self.deferred.advance(delta) {
            if !self.machine_mut(axis).trigger(&event)? {
                tracing::warn!(axis = %axis, event = event.name(), "deferred event rejected");
            }
        }
        for axis in Axis::ALL {
            self.machine_mut(axis).update(delta)?;
        }
        debug_assert!(self.is_safe());
        Ok(())
    }

    /// Force both axes into the safe state and drop pending handoffs.
    pub fn emergency(&mut self) -> Result<(), IntersectionError> {
        tracing::warn!(pending = self.deferred.pending(), "emergency override");
        self.deferred.clear();
        self.broadcast(SignalEvent::Emergency)
    }

    /// Leave the safe state; north-south gets the next green.
    ///
    /// Only resumes the cycle when every axis actually left `FlashingRed`.
    /// Without an active emergency this is a no-op.
    pub fn clear(&mut self) -> Result<(), IntersectionError> {
        let mut cleared = true;
        for axis in Axis::ALL {
            cleared &= self.machine_mut(axis).trigger(&SignalEvent::Clear)?;
        }
        if !cleared {
            tracing::debug!("clear ignored, no emergency active");
            return Ok(());
        }
        self.north_south.trigger(&SignalEvent::Advance)?;
        tracing::info!("emergency cleared");
        Ok(())
    }

    /// Trigger `event` on every axis in [`Axis::ALL`] order.
    pub fn broadcast(&mut self, event: SignalEvent) -> Result<(), IntersectionError> {
        for axis in Axis::ALL {
            self.machine_mut(axis).trigger(&event)?;
        }
        Ok(())
    }

    pub fn signal(&self, axis: Axis) -> Result<Signal, MachineError> {
        self.machine(axis).current_state().copied()
    }

    /// True unless both axes are active at once. Unstarted axes count as
    /// inactive.
    pub fn is_safe(&self) -> bool {
        !Axis::ALL
            .into_iter()
            .all(|axis| self.signal(axis).is_ok_and(|s| s.is_active()))
    }

    pub fn pending_handoffs(&self) -> usize {
        self.deferred.pending()
    }

    pub fn machine(&self, axis: Axis) -> &SignalMachine {
        match axis {
            Axis::NorthSouth => &self.north_south,
            Axis::EastWest => &self.east_west,
        }
    }

    pub fn machine_mut(&mut self, axis: Axis) -> &mut SignalMachine {
        match axis {
            Axis::NorthSouth => &mut self.north_south,
            Axis::EastWest => &mut self.east_west,
        }
    }
}

fn axis_machine(axis: Axis, config: &IntersectionConfig) -> Result<SignalMachine, MachineError> {
    let mut machine = StateMachine::with_config(
        MachineConfig::labeled(axis.label()).with_log_level(config.log_level),
    );
    machine.add_state(Signal::Red)?;
    machine.add_state_with(
        Signal::Green,
        Countdown::new(config.green(), SignalEvent::Advance)
            .with_max_requests(config.advance_retries),
    )?;
    machine.add_state_with(
        Signal::Yellow,
        Countdown::new(config.yellow(), SignalEvent::Advance)
            .with_max_requests(config.advance_retries),
    )?;
    machine.add_state(Signal::FlashingRed)?;
    Ok(machine)
}

/// A peer that has not started yet places no constraint.
pub fn peer_allows_green(peer: &StateProbe<Signal>) -> bool {
    match peer.current() {
        Ok(signal) => signal == Signal::Red,
        Err(MachineError::NotStarted { .. }) => true,
        Err(_) => false,
    }
}

fn install_rules(
    machine: &mut SignalMachine,
    axis: Axis,
    peer: StateProbe<Signal>,
    deferred: &DeferredQueue<Axis, SignalEvent>,
    clearance: Duration,
) -> Result<(), MachineError> {
    // Registered first so the override wins over every other rule.
    machine.add_transition(wildcard_transition(Signal::FlashingRed, SignalEvent::Emergency))?;

    machine.add_transition(
        simple_transition(Signal::Red, Signal::Green, SignalEvent::Advance)
            .with_guard(Guard::new(move |_| peer_allows_green(&peer))),
    )?;
    machine.add_transition(simple_transition(
        Signal::Green,
        Signal::Yellow,
        SignalEvent::Advance,
    ))?;

    let handoff = deferred.clone();
    let handoff_rule: TransitionRule<Signal, SignalEvent> =
        simple_transition(Signal::Yellow, Signal::Red, SignalEvent::Advance).with_action(
            move || {
                handoff.schedule(axis.peer(), SignalEvent::Advance, clearance);
                Ok(())
            },
        );
    machine.add_transition(handoff_rule)?;

    machine.add_transition(simple_transition(
        Signal::FlashingRed,
        Signal::Red,
        SignalEvent::Clear,
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IntersectionConfig {
        IntersectionConfig {
            green_secs: 5.0,
            yellow_secs: 2.0,
            all_red_secs: 1.0,
            ..IntersectionConfig::default()
        }
    }

    fn run(intersection: &mut Intersection, seconds: u32) {
        for _ in 0..seconds {
            intersection.tick(Duration::from_secs(1)).unwrap();
            assert!(intersection.is_safe());
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Intersection::new(IntersectionConfig {
            green_secs: -1.0,
            ..config()
        });

        assert!(matches!(result, Err(IntersectionError::InvalidConfig(ref e)) if e.len() == 1));
    }

    #[test]
    fn start_gives_north_south_the_green() {
        let mut intersection = Intersection::new(config()).unwrap();
        intersection.start().unwrap();

        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Green);
        assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Red);
    }

    #[test]
    fn phases_hand_off_after_clearance() {
        let mut intersection = Intersection::new(config()).unwrap();
        intersection.start().unwrap();

        run(&mut intersection, 5);
        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Yellow);

        run(&mut intersection, 2);
        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Red);
        assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Red);
        assert_eq!(intersection.pending_handoffs(), 1);

        run(&mut intersection, 1);
        assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Green);
        assert_eq!(intersection.pending_handoffs(), 0);
    }

    #[test]
    fn emergency_forces_safe_state_everywhere() {
        let mut intersection = Intersection::new(config()).unwrap();
        intersection.start().unwrap();
        run(&mut intersection, 6);

        intersection.emergency().unwrap();

        for axis in Axis::ALL {
            assert_eq!(intersection.signal(axis).unwrap(), Signal::FlashingRed);
        }
        assert_eq!(intersection.pending_handoffs(), 0);
        run(&mut intersection, 30);
        assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::FlashingRed);
    }

    #[test]
    fn clear_resumes_with_north_south() {
        let mut intersection = Intersection::new(config()).unwrap();
        intersection.start().unwrap();
        intersection.emergency().unwrap();

        intersection.clear().unwrap();

        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Green);
        assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Red);
    }

    #[test]
    fn clear_without_emergency_changes_nothing() {
        let mut intersection = Intersection::new(IntersectionConfig::default()).unwrap();
        intersection.start().unwrap();
        run(&mut intersection, 1);

        intersection.clear().unwrap();

        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Green);
        assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Red);
        assert_eq!(intersection.machine(Axis::NorthSouth).history().len(), 2);
    }

    #[test]
    fn clear_during_yellow_does_not_hand_off_early() {
        let mut intersection = Intersection::new(config()).unwrap();
        intersection.start().unwrap();
        run(&mut intersection, 5);
        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Yellow);

        intersection.clear().unwrap();

        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Yellow);
        assert_eq!(intersection.pending_handoffs(), 0);
    }

    #[test]
    fn handoff_refused_when_peer_turned_green() {
        let mut intersection = Intersection::new(config()).unwrap();
        intersection.start().unwrap();
        run(&mut intersection, 7);
        assert_eq!(intersection.pending_handoffs(), 1);

        // North-south takes the green back before the handoff is due.
        let fired = intersection
            .machine_mut(Axis::NorthSouth)
            .trigger(&SignalEvent::Advance)
            .unwrap();
        assert!(fired);

        run(&mut intersection, 1);

        assert_eq!(intersection.pending_handoffs(), 0);
        assert_eq!(intersection.signal(Axis::NorthSouth).unwrap(), Signal::Green);
        assert_eq!(intersection.signal(Axis::EastWest).unwrap(), Signal::Red);
        assert_eq!(
            intersection.machine(Axis::EastWest).history(),
            vec![Signal::Red]
        );
    }

    #[test]
    fn green_is_refused_while_peer_is_active() {
        let mut intersection = Intersection::new(config()).unwrap();
        intersection.start().unwrap();

        let fired = intersection
            .machine_mut(Axis::EastWest)
            .trigger(&SignalEvent::Advance)
            .unwrap();

        assert!(!fired);
        assert!(intersection.is_safe());
    }

    #[test]
    fn unstarted_peer_does_not_block() {
        let probe = StateMachine::<Signal, SignalEvent>::new("idle").probe();
        assert!(peer_allows_green(&probe));
    }

    #[test]
    fn axes_peer_each_other() {
        assert_eq!(Axis::NorthSouth.peer(), Axis::EastWest);
        assert_eq!(Axis::EastWest.peer(), Axis::NorthSouth);
        assert_eq!(Axis::EastWest.to_string(), "east-west");
    }
}
