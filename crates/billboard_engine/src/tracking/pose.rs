//! Device pose samples

use crate::foundation::math::{Mat4, Point3, Quat, Transform};
use crate::foundation::time::Timestamp;

/// Tracked viewer pose at one instant
///
/// Read-only to the engine; only meaningful while the owning session is
/// running.
#[derive(Debug, Clone, PartialEq)]
pub struct DevicePose {
    /// Viewer position in world space
    pub position: Point3,
    /// Viewer orientation in world space
    pub orientation: Quat,
    /// When the sample was taken
    pub timestamp: Timestamp,
}

impl DevicePose {
    /// Create a pose sample
    pub fn new(position: Point3, orientation: Quat, timestamp: Timestamp) -> Self {
        Self {
            position,
            orientation,
            timestamp,
        }
    }

    /// Pose from an `origin_from_anchor` rigid transform
    pub fn from_matrix(origin_from_anchor: Mat4, timestamp: Timestamp) -> Self {
        let transform = Transform::from_matrix(&origin_from_anchor);
        Self {
            position: Point3::from(transform.position),
            orientation: transform.rotation,
            timestamp,
        }
    }

    /// Whether every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|c| c.is_finite())
            && self.orientation.coords.iter().all(|c| c.is_finite())
    }
}
