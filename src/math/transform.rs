use crate::math::{Vector3, Matrix4, Quaternion};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Represents a transformation in 3D space (position, rotation, and scale)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in 3D space
    pub position: Vector3,

    /// Rotation as a quaternion
    pub rotation: Quaternion,

    /// Scale in each axis
    pub scale: Vector3,
}

impl Transform {
    /// Creates a new transform with the given position, rotation, and scale
    #[inline]
    pub fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates a new identity transform (no translation, no rotation, unit scale)
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::identity(),
            scale: Vector3::one(),
        }
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            rotation: Quaternion::identity(),
            scale: Vector3::one(),
        }
    }

    /// Creates a new transform from a position and rotation
    #[inline]
    pub fn from_position_rotation(position: Vector3, rotation: Quaternion) -> Self {
        Self {
            position,
            rotation,
            scale: Vector3::one(),
        }
    }

    /// Converts the transform to a local-to-world matrix
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::from_trs(self.position, self.rotation, self.scale)
    }

    /// Converts the transform to a world-to-local matrix
    ///
    /// The transform is always TRS, so the inverse is built directly from
    /// the inverse rotation and reciprocal scale instead of a general 4x4
    /// matrix inversion.
    pub fn to_inverse_matrix(&self) -> Matrix4 {
        let inv_scale = Vector3::new(
            safe_recip(self.scale.x),
            safe_recip(self.scale.y),
            safe_recip(self.scale.z),
        );
        let inv_rotation = self.rotation.normalize().conjugate();
        let inv_translation = inv_rotation.rotate_vector(-self.position);

        // S^-1 * [R^-1 | -R^-1 t]; pre_scale covers the translation column too
        Matrix4::from_trs(inv_translation, inv_rotation, Vector3::one()).pre_scale(inv_scale)
    }

    /// Transforms a point from local space to world space
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.to_matrix().multiply_point(point)
    }

    /// Returns the largest scale component (used for scaled sphere radii)
    #[inline]
    pub fn max_scale(&self) -> f32 {
        self.scale.x.max(self.scale.y).max(self.scale.z)
    }
}

impl Matrix4 {
    /// Multiplies each row by the corresponding scale component
    fn pre_scale(mut self, scale: Vector3) -> Self {
        for j in 0..4 {
            self.data[0][j] *= scale.x;
            self.data[1][j] *= scale.y;
            self.data[2][j] *= scale.z;
        }
        self
    }
}

fn safe_recip(v: f32) -> f32 {
    if v.abs() > crate::math::EPSILON {
        1.0 / v
    } else {
        0.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
