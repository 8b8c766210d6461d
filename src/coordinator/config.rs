//! Intersection timing configuration.
//!
//! Validation uses Stillwater's `Validation` so that every invalid field is
//! reported at once instead of stopping at the first one.

use crate::engine::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single invalid configuration field.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number of seconds (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("advance_retries must be at least 1")]
    NoRetries,
}

/// Phase durations and logging for an intersection.
///
/// # Example
///
/// ```rust
/// use junction::coordinator::IntersectionConfig;
///
/// let config = IntersectionConfig::from_json(r#"{"green_secs": 20.0}"#).unwrap();
/// assert_eq!(config.green_secs, 20.0);
/// assert!(config.validate().is_success());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionConfig {
    /// How long an axis stays green
    pub green_secs: f64,

    /// How long an axis stays yellow
    pub yellow_secs: f64,

    /// Clearance between one axis turning red and the other turning green
    pub all_red_secs: f64,

    /// Ticks on which an expired phase may re-request its transition
    pub advance_retries: u32,

    /// Logging level for both axis machines
    pub log_level: LogLevel,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            green_secs: 30.0,
            yellow_secs: 3.0,
            all_red_secs: 2.0,
            advance_retries: 1,
            log_level: LogLevel::Debug,
        }
    }
}

impl IntersectionConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every field, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            positive("green_secs", self.green_secs),
            positive("yellow_secs", self.yellow_secs),
            non_negative("all_red_secs", self.all_red_secs),
            if self.advance_retries == 0 {
                Validation::fail(ConfigError::NoRetries)
            } else {
                Validation::success(())
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and collect the violations into a plain vector.
    pub fn errors(&self) -> Vec<ConfigError> {
        match self.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    // Durations are only meaningful on a validated config.
    pub fn green(&self) -> Duration {
        seconds(self.green_secs)
    }

    pub fn yellow(&self) -> Duration {
        seconds(self.yellow_secs)
    }

    pub fn all_red(&self) -> Duration {
        seconds(self.all_red_secs)
    }

    /// Time a red axis waits while its peer runs a full phase.
    pub fn peer_cycle(&self) -> Duration {
        self.green() + self.yellow() + self.all_red()
    }
}

fn positive(field: &'static str, value: f64) -> Validation<(), NonEmptyVec<ConfigError>> {
    if !value.is_finite() {
        Validation::fail(ConfigError::NotFinite { field, value })
    } else if value <= 0.0 {
        Validation::fail(ConfigError::NotPositive { field, value })
    } else {
        Validation::success(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Validation<(), NonEmptyVec<ConfigError>> {
    if !value.is_finite() {
        Validation::fail(ConfigError::NotFinite { field, value })
    } else if value < 0.0 {
        Validation::fail(ConfigError::Negative { field, value })
    } else {
        Validation::success(())
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
