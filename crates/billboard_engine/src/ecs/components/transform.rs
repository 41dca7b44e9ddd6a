//! Transform component
//!
//! Local to the parent when the entity has a [`Parent`](super::Parent), world
//! space otherwise.

use crate::ecs::Component;
use crate::foundation::math::{Quat, Transform, Vec3};

/// Position, rotation and scale of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Translation
    pub position: Vec3,
    /// Rotation; the only field the billboard pass writes
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl TransformComponent {
    /// Placed at the origin, unrotated and unscaled
    pub fn identity() -> Self {
        Self::from_position(Vec3::zeros())
    }

    /// Placed at `position`
    pub fn from_position(position: Vec3) -> Self {
        Self::from_position_rotation(position, Quat::identity())
    }

    /// Placed at `position` with `rotation`
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::repeat(1.0),
        }
    }

    /// Replace the rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Scale every axis by `scale`
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::repeat(scale);
        self
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<&TransformComponent> for Transform {
    fn from(component: &TransformComponent) -> Self {
        Self {
            position: component.position,
            rotation: component.rotation,
            scale: component.scale,
        }
    }
}
