//! Per-machine configuration.

use serde::{Deserialize, Serialize};

/// Level at which a machine reports its lifecycle through `tracing`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Trace,
    #[default]
    Debug,
    Info,
}

/// Configuration owned by a single machine instance.
///
/// # Example
///
/// ```rust
/// use junction::engine::{LogLevel, MachineConfig};
///
/// let config = MachineConfig::from_json(r#"{"label": "north-south", "log_level": "info"}"#).unwrap();
/// assert_eq!(config.label, "north-south");
/// assert_eq!(config.log_level, LogLevel::Info);
/// assert_eq!(config.history_limit, None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Human-readable name used in logs and errors
    pub label: String,

    /// Level for transition logging
    pub log_level: LogLevel,

    /// Maximum number of visits kept in history; `None` keeps everything
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            label: "machine".to_string(),
            log_level: LogLevel::default(),
            history_limit: None,
        }
    }
}

impl MachineConfig {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
