use nalgebra as na;
use crate::math::{Vector3, Quaternion};
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A 4x4 matrix representation for affine transforms
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix4 {
    pub data: [[f32; 4]; 4],
}

impl Matrix4 {
    /// Creates a new 4x4 matrix from a 2D array
    #[inline]
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    /// Creates a new 4x4 identity matrix
    #[inline]
    pub fn identity() -> Self {
        Self {
            data: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a translation matrix
    #[inline]
    pub fn from_translation(translation: Vector3) -> Self {
        let mut m = Self::identity();
        m.data[0][3] = translation.x;
        m.data[1][3] = translation.y;
        m.data[2][3] = translation.z;
        m
    }

    /// Creates an affine matrix from translation, rotation and scale
    pub fn from_trs(translation: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        let w = rotation.w;
        let x = rotation.x;
        let y = rotation.y;
        let z = rotation.z;

        let xx = x * x;
        let xy = x * y;
        let xz = x * z;
        let xw = x * w;

        let yy = y * y;
        let yz = y * z;
        let yw = y * w;

        let zz = z * z;
        let zw = z * w;

        // Rotation columns scaled per-axis
        Self {
            data: [
                [
                    (1.0 - 2.0 * (yy + zz)) * scale.x,
                    2.0 * (xy - zw) * scale.y,
                    2.0 * (xz + yw) * scale.z,
                    translation.x,
                ],
                [
                    2.0 * (xy + zw) * scale.x,
                    (1.0 - 2.0 * (xx + zz)) * scale.y,
                    2.0 * (yz - xw) * scale.z,
                    translation.y,
                ],
                [
                    2.0 * (xz - yw) * scale.x,
                    2.0 * (yz + xw) * scale.y,
                    (1.0 - 2.0 * (xx + yy)) * scale.z,
                    translation.z,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Transforms a point (applies rotation, scale and translation)
    #[inline]
    pub fn multiply_point(&self, v: Vector3) -> Vector3 {
        Vector3 {
            x: self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z + self.data[0][3],
            y: self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z + self.data[1][3],
            z: self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z + self.data[2][3],
        }
    }

    /// Transforms a direction (ignores translation)
    #[inline]
    pub fn multiply_direction(&self, v: Vector3) -> Vector3 {
        Vector3 {
            x: self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z,
            y: self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z,
            z: self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z,
        }
    }

    /// Multiplies this matrix by another matrix
    pub fn multiply_matrix(&self, other: &Self) -> Self {
        let mut result = [[0.0; 4]; 4];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                for k in 0..4 {
                    *value += self.data[i][k] * other.data[k][j];
                }
            }
        }

        Self { data: result }
    }

    /// Returns the translation component of the matrix
    #[inline]
    pub fn get_translation(&self) -> Vector3 {
        Vector3::new(self.data[0][3], self.data[1][3], self.data[2][3])
    }

    /// Convert to nalgebra Matrix4
    pub fn to_nalgebra(&self) -> na::Matrix4<f32> {
        na::Matrix4::from_fn(|i, j| self.data[i][j])
    }

    /// Convert from nalgebra Matrix4
    pub fn from_nalgebra(m: &na::Matrix4<f32>) -> Self {
        let mut data = [[0.0; 4]; 4];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = m[(i, j)];
            }
        }
        Self { data }
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            writeln!(f, "[{}, {}, {}, {}]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}
