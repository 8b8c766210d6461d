//! Stateless decision boundary.
//!
//! `decide` maps a request describing one axis to the signal it should show
//! next. It never touches a running machine; it re-derives the same phase
//! thresholds the intersection's countdowns use from the shared
//! [`IntersectionConfig`]. `DecisionRecord` is the write-only shape handed
//! to whatever stores decisions.

mod priority;

pub use priority::{BatchSummary, PriorityError, PriorityPolicy};

use crate::coordinator::{IntersectionConfig, Signal, UnknownSignal};
use crate::core::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecisionError {
    #[error(transparent)]
    UnknownState(#[from] UnknownSignal),

    #[error("seconds_elapsed must be a finite, non-negative number (got {0})")]
    InvalidElapsed(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub current_state: String,
    pub seconds_elapsed: f64,
    #[serde(default)]
    pub waiting_count: Option<u32>,
    #[serde(default)]
    pub competing_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub next_state: String,
    pub transitioned: bool,
    pub reason: String,
}

/// Snapshot of one decision for an external store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Id of the machine the decision was made for, usually
    /// [`StateMachine::id`](crate::engine::StateMachine::id).
    pub state_id: Uuid,
    pub waiting_count: Option<u32>,
    pub competing_count: Option<u32>,
    pub seconds_elapsed: f64,
    pub decided_state: String,
    pub recorded_at: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn new(state_id: Uuid, request: &DecisionRequest, response: &DecisionResponse) -> Self {
        Self {
            state_id,
            waiting_count: request.waiting_count,
            competing_count: request.competing_count,
            seconds_elapsed: request.seconds_elapsed,
            decided_state: response.next_state.clone(),
            recorded_at: Utc::now(),
        }
    }
}

/// Compute the next signal for one axis.
///
/// # Example
///
/// ```rust
/// use junction::coordinator::IntersectionConfig;
/// use junction::decision::{decide, DecisionRequest, PriorityPolicy};
///
/// let request = DecisionRequest {
///     current_state: "GREEN".to_string(),
///     seconds_elapsed: 31.0,
///     waiting_count: None,
///     competing_count: None,
/// };
/// let response = decide(&request, &IntersectionConfig::default(), &PriorityPolicy::default()).unwrap();
///
/// assert_eq!(response.next_state, "Yellow");
/// assert!(response.transitioned);
/// ```
pub fn decide(
    request: &DecisionRequest,
    timings: &IntersectionConfig,
    policy: &PriorityPolicy,
) -> Result<DecisionResponse, DecisionError> {
    let current: Signal = request.current_state.parse()?;
    let seconds = request.seconds_elapsed;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(DecisionError::InvalidElapsed(seconds));
    }
    // `abs` folds -0.0; finite values past the Duration range saturate.
    let elapsed = Duration::try_from_secs_f64(seconds.abs()).unwrap_or(Duration::MAX);

    let (next, reason) = match current {
        Signal::Green if elapsed >= timings.green() => (Signal::Yellow, "green interval elapsed"),
        Signal::Green => (Signal::Green, "green interval running"),
        Signal::Yellow if elapsed >= timings.yellow() => (Signal::Red, "yellow interval elapsed"),
        Signal::Yellow => (Signal::Yellow, "yellow interval running"),
        Signal::Red => match (request.waiting_count, request.competing_count) {
            (Some(waiting), Some(competing)) if policy.is_local_lane_priority(waiting, competing) => {
                (Signal::Green, "local lane priority")
            }
            _ if elapsed >= timings.peer_cycle() => (Signal::Green, "cross traffic cycle elapsed"),
            _ => (Signal::Red, "waiting for cross traffic"),
        },
        Signal::FlashingRed => (Signal::FlashingRed, "held until cleared"),
    };

    Ok(DecisionResponse {
        next_state: next.name().to_string(),
        transitioned: next != current,
        reason: reason.to_string(),
    })
}
