//! State visit history tracking.
//!
//! Every machine keeps an append-only record of the states it has occupied
//! since `start`, oldest first. The record is unbounded unless a limit is
//! configured, in which case the oldest visits are evicted.

use super::state::State;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state visit.
///
/// `via` names the event that caused the visit; it is `None` for the
/// initial state entered through `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct Visit<S: State> {
    /// The state that was entered
    pub state: S,
    /// When the state was entered
    pub entered_at: DateTime<Utc>,
    /// Name of the triggering event, if any
    pub via: Option<String>,
}

impl<S: State> Visit<S> {
    /// Visit of the initial state.
    pub fn initial(state: S) -> Self {
        Self {
            state,
            entered_at: Utc::now(),
            via: None,
        }
    }

    /// Visit caused by an event.
    pub fn via(state: S, event: &str) -> Self {
        Self {
            state,
            entered_at: Utc::now(),
            via: Some(event.to_string()),
        }
    }
}

/// Ordered history of state visits.
///
/// # Example
///
/// ```rust
/// use junction::core::{StateHistory, Visit};
///
/// let mut history = StateHistory::new();
/// history.record(Visit::initial("RED"));
/// history.record(Visit::via("GREEN", "TICK"));
///
/// assert_eq!(history.get_path(), vec!["RED", "GREEN"]);
/// ```
#[derive(Clone, Debug)]
pub struct StateHistory<S: State> {
    visits: VecDeque<Visit<S>>,
    limit: Option<usize>,
    evicted: usize,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            visits: VecDeque::new(),
            limit: None,
            evicted: 0,
        }
    }

    /// Create a history that retains at most `limit` visits.
    ///
    /// A limit of zero retains nothing but still counts evictions.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            visits: VecDeque::new(),
            limit,
            evicted: 0,
        }
    }

    /// Append a visit, evicting the oldest one if the limit is reached.
    pub fn record(&mut self, visit: Visit<S>) {
        self.visits.push_back(visit);
        if let Some(limit) = self.limit {
            while self.visits.len() > limit {
                self.visits.pop_front();
                self.evicted += 1;
            }
        }
    }

    /// Get the path of states traversed, oldest first.
    ///
    /// The returned vector is an independent copy.
    pub fn get_path(&self) -> Vec<S> {
        self.visits.iter().map(|v| v.state.clone()).collect()
    }

    /// Get the names of the states traversed, oldest first.
    pub fn names(&self) -> Vec<String> {
        self.visits
            .iter()
            .map(|v| v.state.name().to_string())
            .collect()
    }

    /// Calculate the duration between the oldest and newest retained visit.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        match (self.visits.front(), self.visits.back()) {
            (Some(first), Some(last)) => last
                .entered_at
                .signed_duration_since(first.entered_at)
                .to_std()
                .ok(),
            _ => None,
        }
    }

    /// Iterate over retained visits in order.
    pub fn visits(&self) -> impl Iterator<Item = &Visit<S>> {
        self.visits.iter()
    }

    /// Most recent visit.
    pub fn last(&self) -> Option<&Visit<S>> {
        self.visits.back()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Number of visits dropped because of the retention limit.
    pub fn evicted(&self) -> usize {
        self.evicted
    }
}
