//! Math types
//!
//! `nalgebra` aliases plus the TRS [`Transform`] used when resolving parent
//! chains. World space is Y-up right-handed.

/// 3D vector
pub type Vec3 = nalgebra::Vector3<f32>;

/// 3x3 matrix
pub type Mat3 = nalgebra::Matrix3<f32>;

/// 4x4 homogeneous matrix
pub type Mat4 = nalgebra::Matrix4<f32>;

/// 3D point
pub type Point3 = nalgebra::Point3<f32>;

/// Unit quaternion rotation
pub type Quat = nalgebra::UnitQuaternion<f32>;

/// World up; upright orientations keep this axis fixed
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Translation, rotation and per-axis scale, applied scale first
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation
    pub position: Vec3,
    /// Rotation
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Transform {
    /// The transform that changes nothing
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::repeat(1.0),
        }
    }

    /// Unscaled transform
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::repeat(1.0),
        }
    }

    /// Split an affine matrix without shear into translation, rotation and scale
    ///
    /// Tracking providers report `origin_from_anchor` matrices in this form.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let linear: Mat3 = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let scale = Vec3::from_iterator(linear.column_iter().map(|axis| axis.norm()));
        let unscaled = Mat3::from_fn(|row, col| linear[(row, col)] / scale[col]);

        Self {
            position: matrix.fixed_view::<3, 1>(0, 3).into_owned(),
            rotation: Quat::from_matrix(&unscaled),
            scale,
        }
    }

    /// Express `child`, given relative to `self`, in `self`'s parent space
    pub fn combine(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * self.scale.component_mul(&child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
