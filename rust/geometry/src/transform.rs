// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement transforms applied while decoding
//!
//! Matrices use nalgebra's column-vector convention: a point is transformed
//! as `M * p` and the translation lives in the last column. Positions get
//! the full affine matrix, normals only its rotation, so a transform with
//! scale or translation never distorts shading directions.
//!
//! A mirroring placement (negative determinant) is split into a proper
//! rotation followed by a point reflection, so normals follow the mirrored
//! positions. Triangle winding is left as stored.

use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, UnitQuaternion, Vector3};

/// Affine placement with its pure rotation pre-extracted
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f64>,
    /// `None` when the rotation part is the identity
    rotation: Option<UnitQuaternion<f64>>,
    /// Linear part has a negative determinant
    mirrored: bool,
}

impl Transform {
    /// Build from a column-vector convention matrix (translation in the last column)
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        let (rotation, mirrored) = extract_rotation(&matrix);
        Self {
            matrix,
            rotation,
            mirrored,
        }
    }

    pub fn identity() -> Self {
        Self::from_matrix(Matrix4::identity())
    }

    /// Pure translation
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_matrix(Matrix4::new_translation(&Vector3::new(x, y, z)))
    }

    /// 16 values in column-major order
    pub fn from_column_major(values: &[f64; 16]) -> Self {
        Self::from_matrix(Matrix4::from_column_slice(values))
    }

    /// 16 values in row-major order
    pub fn from_row_major(values: &[f64; 16]) -> Self {
        Self::from_matrix(Matrix4::from_row_slice(values))
    }

    /// 16 values in the geometry engine's layout: `M11..M14, M21..M24,
    /// M31..M34, OffsetX, OffsetY, OffsetZ, M44`
    ///
    /// That layout is row-major for row vectors (`p' = p * M`, translation in
    /// the last row), which is the transpose of the column-vector matrix.
    /// Read as column-major it yields the column-vector form directly.
    pub fn from_row_vector_major(values: &[f64; 16]) -> Self {
        Self::from_column_major(values)
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Proper rotation part; for a mirroring transform this excludes the
    /// reflection, see [`Transform::is_mirrored`]
    #[inline]
    pub fn rotation(&self) -> Option<&UnitQuaternion<f64>> {
        self.rotation.as_ref()
    }

    /// True when the placement flips handedness
    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Apply the full affine transform to a position
    #[inline]
    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    /// Apply only the orientation to a direction; scale and translation are
    /// ignored, a reflection is kept
    #[inline]
    pub fn apply_normal(&self, normal: &Vector3<f64>) -> Vector3<f64> {
        let rotated = match &self.rotation {
            Some(rotation) => rotation * normal,
            None => *normal,
        };
        if self.mirrored {
            -rotated
        } else {
            rotated
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for Transform {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self::from_matrix(matrix)
    }
}

/// Strip per-axis scale from the linear part and convert what is left to a
/// quaternion. Degenerate (zero-length) axes yield no rotation.
///
/// An orthonormal basis `Q` with `det(Q) < 0` is handled as `(-Q) * (-I)`:
/// `-Q` is a proper rotation and the point reflection is reported as the
/// mirror flag.
fn extract_rotation(matrix: &Matrix4<f64>) -> (Option<UnitQuaternion<f64>>, bool) {
    let mut linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    for mut column in linear.column_iter_mut() {
        if column.norm() <= f64::EPSILON {
            return (None, false);
        }
        column.normalize_mut();
    }

    let mirrored = linear.determinant() < 0.0;
    if mirrored {
        linear.neg_mut();
    }

    // Closed form handles half turns; renormalise for sheared bases
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(linear));
    let rotation = UnitQuaternion::new_normalize(rotation.into_inner());
    if rotation.angle() == 0.0 {
        (None, mirrored)
    } else {
        (Some(rotation), mirrored)
    }
}
