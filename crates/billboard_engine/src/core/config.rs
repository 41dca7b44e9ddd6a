//! # Unified Configuration System
//!
//! All engine-side configuration structures live here: core engine behavior,
//! world tracking, and the billboard orientation pass. Every struct has
//! defaults, builder-style setters and validation, and loads from TOML or RON
//! through the [`Config`] trait.

use crate::billboard::ForwardAxis;
use crate::config::{Config, ConfigError};
use crate::ecs::UpdateMode;
use serde::{Deserialize, Serialize};

/// # Engine Configuration
///
/// Core engine behavior: logging and frame pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log level; `RUST_LOG` overrides it
    pub log_level: String,
    /// Target FPS for frame rate limiting
    pub target_fps: Option<u32>,
    /// Emit a stats line every this many frames (0 disables)
    pub stats_interval_frames: u64,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: Some(90),
            stats_interval_frames: 90,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS; `None` runs unthrottled
    pub fn with_target_fps(mut self, fps: Option<u32>) -> Self {
        self.target_fps = fps;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: format!("unknown level '{}'", self.log_level),
            });
        }
        if self.target_fps == Some(0) {
            return Err(ConfigError::Invalid {
                field: "target_fps",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// # Tracking Configuration
///
/// Limits applied to pose lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Samples older than this (seconds) no longer resolve
    pub max_pose_age_secs: f64,
    /// Pose samples retained for lookups
    pub history_capacity: usize,
}

impl TrackingConfig {
    /// Create a new tracking configuration
    pub fn new() -> Self {
        Self {
            max_pose_age_secs: 1.0,
            history_capacity: 64,
        }
    }

    /// Set the staleness limit
    pub fn with_max_pose_age(mut self, secs: f64) -> Self {
        self.max_pose_age_secs = secs;
        self
    }

    /// Set the history size
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for TrackingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_pose_age_secs.is_finite() && self.max_pose_age_secs >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_pose_age_secs",
                reason: format!("{} is not a non-negative duration", self.max_pose_age_secs),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: "must hold at least one sample".to_string(),
            });
        }
        Ok(())
    }
}

/// # Billboard Configuration
///
/// Parameters of the yaw-only orientation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillboardConfig {
    /// Local axis that is turned toward the viewer
    pub forward_axis: ForwardAxis,
    /// Horizontal distances below this keep the previous rotation
    pub degenerate_epsilon: f32,
    /// When tagged-entity membership is re-evaluated
    pub query_mode: UpdateMode,
}

impl BillboardConfig {
    /// Create a new billboard configuration
    pub fn new() -> Self {
        Self {
            forward_axis: ForwardAxis::default(),
            degenerate_epsilon: 1e-6,
            query_mode: UpdateMode::Rendering,
        }
    }

    /// Set the forward axis
    pub fn with_forward_axis(mut self, axis: ForwardAxis) -> Self {
        self.forward_axis = axis;
        self
    }

    /// Set the degenerate-direction threshold
    pub fn with_degenerate_epsilon(mut self, epsilon: f32) -> Self {
        self.degenerate_epsilon = epsilon;
        self
    }

    /// Set the query mode
    pub fn with_query_mode(mut self, mode: UpdateMode) -> Self {
        self.query_mode = mode;
        self
    }
}

impl Default for BillboardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for BillboardConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.degenerate_epsilon.is_finite() && self.degenerate_epsilon > 0.0) {
            return Err(ConfigError::Invalid {
                field: "degenerate_epsilon",
                reason: format!("{} is not a positive distance", self.degenerate_epsilon),
            });
        }
        Ok(())
    }
}
