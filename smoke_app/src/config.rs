//! Smoke demo configuration

use billboard_engine::config::{Config, ConfigError};
use billboard_engine::core::config::{BillboardConfig, EngineConfig, TrackingConfig};
use billboard_engine::foundation::math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Circular path the simulated viewer walks around the candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOrbitConfig {
    /// Orbit center on the floor
    pub center: [f32; 3],
    /// Horizontal distance from the center
    pub radius: f32,
    /// Eye height above the floor
    pub height: f32,
    /// Walking speed around the orbit
    pub degrees_per_second: f32,
}

impl Default for ViewerOrbitConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 0.0],
            radius: 2.0,
            height: 1.6,
            degrees_per_second: 30.0,
        }
    }
}

impl ViewerOrbitConfig {
    /// Viewer eye position `elapsed_secs` into the walk
    ///
    /// Starts on +Z of the center and walks toward +X.
    pub fn position_at(&self, elapsed_secs: f32) -> Point3 {
        let angle = (self.degrees_per_second * elapsed_secs).to_radians();
        let center = Vec3::from(self.center);
        Point3::new(
            center.x + self.radius * angle.sin(),
            center.y + self.height,
            center.z + self.radius * angle.cos(),
        )
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeAppConfig {
    /// Frames to run before exiting
    pub frames: u64,
    /// Simulation sub-steps between rendered frames
    pub simulation_substeps: u32,
    /// Frames before the mock tracker accepts the subscription
    pub subscription_delay_frames: u64,
    /// Engine settings
    pub engine: EngineConfig,
    /// Pose lookup limits
    pub tracking: TrackingConfig,
    /// Orientation pass settings
    pub billboard: BillboardConfig,
    /// Simulated viewer path
    pub viewer: ViewerOrbitConfig,
}

impl Default for SmokeAppConfig {
    fn default() -> Self {
        Self {
            frames: 900,
            simulation_substeps: 2,
            subscription_delay_frames: 30,
            engine: EngineConfig::default(),
            tracking: TrackingConfig::default(),
            billboard: BillboardConfig::default(),
            viewer: ViewerOrbitConfig::default(),
        }
    }
}

impl Config for SmokeAppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.tracking.validate()?;
        self.billboard.validate()?;
        if !(self.viewer.radius.is_finite() && self.viewer.radius >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "viewer.radius",
                reason: format!("{} is not a non-negative distance", self.viewer.radius),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orbit_starts_in_front_and_walks_toward_positive_x() {
        let orbit = ViewerOrbitConfig::default();

        assert_relative_eq!(orbit.position_at(0.0), Point3::new(0.0, 1.6, 2.0), epsilon = 1e-6);
        assert_relative_eq!(orbit.position_at(3.0), Point3::new(2.0, 1.6, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_bundled_config_parses_and_validates() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/smoke_app.toml");
        let config = SmokeAppConfig::load_from_file(path).unwrap();

        assert_eq!(config.frames, 900);
        assert_eq!(config.tracking.history_capacity, 32);
    }

    #[test]
    fn test_negative_radius_is_rejected() {
        let mut config = SmokeAppConfig::default();
        config.viewer.radius = -1.0;
        assert!(config.validate().is_err());
    }
}
