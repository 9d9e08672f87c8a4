//! Engine configuration.
//!
//! All fields have defaults matching the institution data the engine was
//! built for, so an empty JSON object is a valid configuration.
//!
//! ```
//! use u_timetable::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "hour_length_minutes": 60 }"#).unwrap();
//! assert_eq!(config.hour_length_minutes, 60);
//! assert_eq!(config.chunk_size, 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scheduler::RotationPolicy;

/// Tunables for one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of one institutional credit-hour, in minutes.
    pub hour_length_minutes: i32,
    /// Subjects per persistence chunk.
    pub chunk_size: usize,
    /// How the day-rotation offset is derived.
    pub rotation: RotationPolicy,
    /// Whether breaks are written into the timetable as break slots.
    pub materialize_breaks: bool,
    /// Maximum failure messages listed by [`BatchReport::warnings`](crate::scheduler::BatchReport::warnings).
    pub max_reported_failures: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hour_length_minutes: 45,
            chunk_size: 8,
            rotation: RotationPolicy::SubjectId,
            materialize_breaks: true,
            max_reported_failures: 20,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the institutional hour length.
    pub fn with_hour_length(mut self, minutes: i32) -> Self {
        self.hour_length_minutes = minutes;
        self
    }

    /// Sets the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the rotation policy.
    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// Enables or disables break materialization.
    pub fn with_materialize_breaks(mut self, enabled: bool) -> Self {
        self.materialize_breaks = enabled;
        self
    }

    /// Sets the reported failure limit.
    pub fn with_max_reported_failures(mut self, limit: usize) -> Self {
        self.max_reported_failures = limit;
        self
    }

    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.hour_length_minutes <= 0 {
            return Err(ConfigError::NonPositiveHourLength(self.hour_length_minutes));
        }
        Ok(())
    }
}
