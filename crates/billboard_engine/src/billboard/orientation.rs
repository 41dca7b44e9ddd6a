//! Yaw-only look-at calculations
//!
//! The billboard's up axis is locked to world up and it rotates around that
//! axis to face the viewer, so vertical elements such as smoke columns never
//! tilt.

use crate::foundation::math::{Point3, Quat, Vec3, WORLD_UP};
use serde::{Deserialize, Serialize};

/// Local axis turned toward the viewer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardAxis {
    /// -Z faces the viewer, the engine's camera and look-at convention
    #[default]
    NegativeZ,
    /// +Z faces the viewer, for sprites authored facing +Z
    PositiveZ,
}

impl ForwardAxis {
    /// The axis in local space
    pub fn local_vector(self) -> Vec3 {
        match self {
            Self::NegativeZ => Vec3::new(0.0, 0.0, -1.0),
            Self::PositiveZ => Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// The viewer's horizontal position at the entity's own height
///
/// Looking at this point instead of the viewer removes pitch by construction.
pub fn project_to_height(viewer: &Point3, entity_position: &Vec3) -> Vec3 {
    Vec3::new(viewer.x, entity_position.y, viewer.z)
}

/// Rotation turning `forward` from `from` toward `target` about world up only
///
/// Returns `None` when the horizontal distance is below `epsilon` or any input
/// is not finite; the caller keeps the previous rotation in that case.
pub fn yaw_look_rotation(from: &Vec3, target: &Vec3, forward: ForwardAxis, epsilon: f32) -> Option<Quat> {
    let to_target = target - from;
    let horizontal = to_target - WORLD_UP * WORLD_UP.dot(&to_target);
    if !horizontal.iter().all(|c| c.is_finite()) {
        return None;
    }

    let distance = horizontal.norm();
    if distance < epsilon {
        return None;
    }

    let direction = horizontal / distance;
    // face_towards aligns local +Z with its argument
    let facing = match forward {
        ForwardAxis::NegativeZ => -direction,
        ForwardAxis::PositiveZ => direction,
    };
    Some(Quat::face_towards(&facing, &WORLD_UP))
}

/// Heading of `forward` under `rotation`, in radians about world up
///
/// Zero means facing +Z; positive angles turn toward +X.
pub fn yaw_angle(rotation: &Quat, forward: ForwardAxis) -> f32 {
    let facing = rotation * forward.local_vector();
    facing.x.atan2(facing.z)
}
