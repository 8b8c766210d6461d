//! Local lane priority gate.
//!
//! Decides, per lane, whether waiting traffic justifies switching that lane
//! to green against the competing cross traffic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriorityError {
    #[error("waiting and competing counts must have the same length (got {waiting} and {competing})")]
    LengthMismatch { waiting: usize, competing: usize },
}

/// Thresholds of the priority gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityPolicy {
    /// Waiting vehicles needed before competing traffic is considered
    pub min_waiting: u32,
    /// Competing vehicles tolerated when `min_waiting` is met
    pub max_competing: u32,
    /// Waiting/competing ratio that grants priority on its own
    pub priority_ratio: f64,
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self {
            min_waiting: 3,
            max_competing: 2,
            priority_ratio: 1.5,
        }
    }
}

/// Element-wise gate results plus aggregate counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub decisions: Vec<bool>,
    pub ratios: Vec<f64>,
    pub green_count: usize,
    pub red_count: usize,
}

impl PriorityPolicy {
    /// Waiting/competing ratio, with zero competing traffic counted as one.
    pub fn ratio(waiting: u32, competing: u32) -> f64 {
        f64::from(waiting) / f64::from(competing.max(1))
    }

    /// Whether a lane should switch to green.
    ///
    /// # Example
    ///
    /// ```rust
    /// use junction::decision::PriorityPolicy;
    ///
    /// let policy = PriorityPolicy::default();
    /// assert!(policy.is_local_lane_priority(5, 1));
    /// assert!(!policy.is_local_lane_priority(2, 3));
    /// ```
    pub fn is_local_lane_priority(&self, waiting: u32, competing: u32) -> bool {
        let enough_demand = waiting >= self.min_waiting && competing <= self.max_competing;
        let dominant = Self::ratio(waiting, competing) >= self.priority_ratio;
        let unopposed = competing == 0 && waiting > 0;
        enough_demand || dominant || unopposed
    }

    /// Apply the gate to paired lane counts.
    pub fn decide_batch(&self, waiting: &[u32], competing: &[u32]) -> Result<Vec<bool>, PriorityError> {
        check_lengths(waiting, competing)?;
        Ok(waiting
            .iter()
            .zip(competing)
            .map(|(&w, &c)| self.is_local_lane_priority(w, c))
            .collect())
    }

    /// Apply the gate and report ratios and green/red totals.
    pub fn summarize(&self, waiting: &[u32], competing: &[u32]) -> Result<BatchSummary, PriorityError> {
        let decisions = self.decide_batch(waiting, competing)?;
        let ratios = waiting
            .iter()
            .zip(competing)
            .map(|(&w, &c)| Self::ratio(w, c))
            .collect();
        let green_count = decisions.iter().filter(|&&d| d).count();
        let red_count = decisions.len() - green_count;

        Ok(BatchSummary {
            decisions,
            ratios,
            green_count,
            red_count,
        })
    }
}

fn check_lengths(waiting: &[u32], competing: &[u32]) -> Result<(), PriorityError> {
    if waiting.len() == competing.len() {
        Ok(())
    } else {
        Err(PriorityError::LengthMismatch {
            waiting: waiting.len(),
            competing: competing.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_priority_logic() {
        let decisions = PriorityPolicy::default()
            .decide_batch(&[5, 2, 8, 1], &[1, 3, 2, 5])
            .unwrap();

        assert_eq!(decisions, vec![true, false, true, false]);
    }

    #[test]
    fn ratio_grants_priority() {
        let decisions = PriorityPolicy::default()
            .decide_batch(&[10, 1], &[5, 0])
            .unwrap();

        assert_eq!(decisions, vec![true, true]);
    }

    #[test]
    fn zero_competing_needs_some_waiting() {
        let policy = PriorityPolicy::default();

        assert!(policy.is_local_lane_priority(3, 0));
        assert!(!policy.is_local_lane_priority(0, 0));
    }

    #[test]
    fn custom_thresholds() {
        let policy = PriorityPolicy {
            min_waiting: 2,
            max_competing: 3,
            ..PriorityPolicy::default()
        };

        let decisions = policy.decide_batch(&[2, 5, 1], &[1, 3, 1]).unwrap();

        assert_eq!(decisions, vec![true, true, false]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let result = PriorityPolicy::default().decide_batch(&[1, 2, 3], &[1, 2]);

        assert_eq!(
            result,
            Err(PriorityError::LengthMismatch {
                waiting: 3,
                competing: 2
            })
        );
    }

    #[test]
    fn summary_counts_add_up() {
        let summary = PriorityPolicy::default()
            .summarize(&[5, 2, 8], &[1, 3, 2])
            .unwrap();

        assert_eq!(summary.green_count, 2);
        assert_eq!(summary.red_count, 1);
        assert_eq!(summary.ratios, vec![5.0, 2.0 / 3.0, 4.0]);
    }
}
