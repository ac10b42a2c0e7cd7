//! 2D affine transformations.
//!
//! Provides the path-to-surface transform and conversion from the OpenVG
//! 3x3 matrix layout.

use glam::{Mat3, Vec2, Vec3};

/// A 2D affine transformation matrix.
///
/// Internally uses a 3x3 matrix for affine transforms.
/// The last row is always [0, 0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    matrix: Mat3,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// Identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        matrix: Mat3::IDENTITY,
    };

    /// Create from a 3x3 matrix. The projective row is discarded.
    pub fn from_mat3(matrix: Mat3) -> Self {
        let mut matrix = matrix;
        matrix.x_axis.z = 0.0;
        matrix.y_axis.z = 0.0;
        matrix.z_axis.z = 1.0;
        Self { matrix }
    }

    /// Create from the nine values of an OpenVG matrix,
    /// `{ sx, shy, w0, shx, sy, w1, tx, ty, w2 }` (column major).
    pub fn from_vg_matrix(m: [f32; 9]) -> Self {
        Self::from_mat3(Mat3::from_cols_array(&m))
    }

    /// The nine OpenVG matrix values.
    pub fn to_vg_matrix(&self) -> [f32; 9] {
        self.matrix.to_cols_array()
    }

    /// Create a translation transform.
    pub fn translate(offset: Vec2) -> Self {
        Self {
            matrix: Mat3::from_translation(offset),
        }
    }

    /// Create a rotation transform (angle in radians).
    pub fn rotate(angle: f32) -> Self {
        Self {
            matrix: Mat3::from_angle(angle),
        }
    }

    /// Create a uniform scale transform.
    pub fn scale(factor: f32) -> Self {
        Self {
            matrix: Mat3::from_scale(Vec2::splat(factor)),
        }
    }

    /// Create a non-uniform scale transform.
    pub fn scale_xy(scale: Vec2) -> Self {
        Self {
            matrix: Mat3::from_scale(scale),
        }
    }

    /// Create a shear transform from the two shear factors.
    pub fn shear(shear_x: f32, shear_y: f32) -> Self {
        Self {
            matrix: Mat3::from_cols(
                Vec3::new(1.0, shear_y, 0.0),
                Vec3::new(shear_x, 1.0, 0.0),
                Vec3::Z,
            ),
        }
    }

    /// Combine two transforms (self then other).
    pub fn then(&self, other: &Transform2D) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Add a translation after this transform.
    pub fn then_translate(&self, offset: Vec2) -> Self {
        self.then(&Transform2D::translate(offset))
    }

    /// Add a rotation after this transform.
    pub fn then_rotate(&self, angle: f32) -> Self {
        self.then(&Transform2D::rotate(angle))
    }

    /// Add a scale after this transform.
    pub fn then_scale(&self, factor: f32) -> Self {
        self.then(&Transform2D::scale(factor))
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Mat3::IDENTITY
    }

    /// Transform a point.
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.matrix.transform_point2(point)
    }

    /// Transform a vector (ignores translation).
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        self.matrix.transform_vector2(vector)
    }

    /// Get the inverse transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.matrix.determinant();
        if det.abs() < f32::EPSILON {
            None
        } else {
            Some(Self {
                matrix: self.matrix.inverse(),
            })
        }
    }

    /// Get the underlying 3x3 matrix.
    pub fn as_mat3(&self) -> &Mat3 {
        &self.matrix
    }
}

impl std::ops::Mul<Transform2D> for Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: Transform2D) -> Transform2D {
        self.then(&rhs)
    }
}

impl std::ops::Mul<Vec2> for Transform2D {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_point(rhs)
    }
}
