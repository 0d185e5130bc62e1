/// 3D affine transforms stored as 4x4 row-major matrices
use std::fmt;
use std::ops::{Mul, MulAssign};

use nalgebra::Matrix4;

use crate::angle::Angle;
use crate::Vector3f;

/// A 4x4 transform matrix.
///
/// Element (row `r`, column `c`) lives at index `r * 4 + c` of the
/// underlying array. Points are treated as column vectors `(x, y, z, 1)`,
/// so the translation occupies the last column.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Transform3 {
    matrix: [f32; 16],
}

impl Transform3 {
    /// The identity transform (does nothing)
    #[rustfmt::skip]
    pub const IDENTITY: Transform3 = Transform3::from_rows(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );

    pub const fn new() -> Self {
        Self::IDENTITY
    }

    /// Build a transform from its 16 elements, given row by row
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn from_rows(
        a00: f32, a01: f32, a02: f32, a03: f32,
        a10: f32, a11: f32, a12: f32, a13: f32,
        a20: f32, a21: f32, a22: f32, a23: f32,
        a30: f32, a31: f32, a32: f32, a33: f32,
    ) -> Self {
        Self {
            matrix: [
                a00, a01, a02, a03,
                a10, a11, a12, a13,
                a20, a21, a22, a23,
                a30, a31, a32, a33,
            ],
        }
    }

    pub const fn from_row_major(matrix: [f32; 16]) -> Self {
        Self { matrix }
    }

    /// The 16 matrix elements in row-major order.
    ///
    /// Rendering APIs that expect a column-major matrix read this buffer
    /// as the transpose, which is what they need for row-vector
    /// multiplication.
    pub const fn matrix(&self) -> &[f32; 16] {
        &self.matrix
    }

    /// Element at `row`, `col`. Panics if either index is above 3.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "matrix index ({row}, {col}) out of range");
        self.matrix[row * 4 + col]
    }

    /// A pure translation by `offset`
    #[rustfmt::skip]
    pub fn translation(offset: Vector3f) -> Self {
        Self::from_rows(
            1.0, 0.0, 0.0, offset.x,
            0.0, 1.0, 0.0, offset.y,
            0.0, 0.0, 1.0, offset.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation around the X axis
    #[rustfmt::skip]
    pub fn rotation_x(angle: Angle) -> Self {
        let (sin, cos) = angle.as_radians().sin_cos();
        Self::from_rows(
            1.0, 0.0, 0.0, 0.0,
            0.0, cos, -sin, 0.0,
            0.0, sin,  cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation around the Y axis
    #[rustfmt::skip]
    pub fn rotation_y(angle: Angle) -> Self {
        let (sin, cos) = angle.as_radians().sin_cos();
        Self::from_rows(
             cos, 0.0, sin, 0.0,
             0.0, 1.0, 0.0, 0.0,
            -sin, 0.0, cos, 0.0,
             0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation around the Z axis
    #[rustfmt::skip]
    pub fn rotation_z(angle: Angle) -> Self {
        let (sin, cos) = angle.as_radians().sin_cos();
        Self::from_rows(
            cos, -sin, 0.0, 0.0,
            sin,  cos, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Non-uniform scaling along the three axes
    #[rustfmt::skip]
    pub fn scaling(factors: Vector3f) -> Self {
        Self::from_rows(
            factors.x, 0.0, 0.0, 0.0,
            0.0, factors.y, 0.0, 0.0,
            0.0, 0.0, factors.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Move the translation column of a linear transform so that `center`
    /// maps onto itself.
    fn pivoted(mut linear: Transform3, center: Vector3f) -> Self {
        let moved = linear.transform_direction(center);
        linear.matrix[3] = center.x - moved.x;
        linear.matrix[7] = center.y - moved.y;
        linear.matrix[11] = center.z - moved.z;
        linear
    }

    pub fn determinant(&self) -> f32 {
        let (s, c) = self.minors();
        expand(&s, &c)
    }

    /// 2x2 minors of the top two rows (`s`) and the bottom two rows (`c`),
    /// shared by the determinant and the adjugate.
    #[rustfmt::skip]
    fn minors(&self) -> ([f32; 6], [f32; 6]) {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.matrix;

        let s = [
            a00 * a11 - a10 * a01,
            a00 * a12 - a10 * a02,
            a00 * a13 - a10 * a03,
            a01 * a12 - a11 * a02,
            a01 * a13 - a11 * a03,
            a02 * a13 - a12 * a03,
        ];
        let c = [
            a20 * a31 - a30 * a21,
            a20 * a32 - a30 * a22,
            a20 * a33 - a30 * a23,
            a21 * a32 - a31 * a22,
            a21 * a33 - a31 * a23,
            a22 * a33 - a32 * a23,
        ];
        (s, c)
    }

    /// Inverse computed from the adjugate, or `None` when the matrix is
    /// singular.
    ///
    /// When the determinant over- or underflows `f32`, the inversion is
    /// retried on the matrix scaled by a power of two close to its largest
    /// element. Power-of-two scaling is exact, so singular matrices stay
    /// singular.
    pub fn try_inverse(&self) -> Option<Self> {
        if let Some(inverse) = self.adjugate_inverse() {
            return Some(inverse);
        }

        let largest = self.matrix.iter().fold(0.0f32, |max, v| max.max(v.abs()));
        if largest == 0.0 || !largest.is_finite() {
            return None;
        }
        let k = 2f32.powi(largest.log2().round() as i32);
        if k == 1.0 {
            return None;
        }

        // (M / k)^-1 = k * M^-1
        let mut scaled = *self;
        scaled.matrix.iter_mut().for_each(|v| *v /= k);
        let mut inverse = scaled.adjugate_inverse()?;
        inverse.matrix.iter_mut().for_each(|v| *v /= k);
        Some(inverse)
    }

    #[rustfmt::skip]
    fn adjugate_inverse(&self) -> Option<Self> {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.matrix;
        let (s, c) = self.minors();

        let det = expand(&s, &c);
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;

        Some(Self::from_rows(
            (a11 * c[5] - a12 * c[4] + a13 * c[3]) * inv,
            (-a01 * c[5] + a02 * c[4] - a03 * c[3]) * inv,
            (a31 * s[5] - a32 * s[4] + a33 * s[3]) * inv,
            (-a21 * s[5] + a22 * s[4] - a23 * s[3]) * inv,
            (-a10 * c[5] + a12 * c[2] - a13 * c[1]) * inv,
            (a00 * c[5] - a02 * c[2] + a03 * c[1]) * inv,
            (-a30 * s[5] + a32 * s[2] - a33 * s[1]) * inv,
            (a20 * s[5] - a22 * s[2] + a23 * s[1]) * inv,
            (a10 * c[4] - a11 * c[2] + a13 * c[0]) * inv,
            (-a00 * c[4] + a01 * c[2] - a03 * c[0]) * inv,
            (a30 * s[4] - a31 * s[2] + a33 * s[0]) * inv,
            (-a20 * s[4] + a21 * s[2] - a23 * s[0]) * inv,
            (-a10 * c[3] + a11 * c[1] - a12 * c[0]) * inv,
            (a00 * c[3] - a01 * c[1] + a02 * c[0]) * inv,
            (-a30 * s[3] + a31 * s[1] - a32 * s[0]) * inv,
            (a20 * s[3] - a21 * s[1] + a22 * s[0]) * inv,
        ))
    }

    /// Inverse of the transform.
    ///
    /// If the inverse cannot be computed, the identity transform is
    /// returned. Use [`Transform3::try_inverse`] to detect that case.
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|| {
            log::debug!("singular transform has no inverse, using identity:\n{}", self);
            Self::IDENTITY
        })
    }

    pub fn transpose(&self) -> Self {
        let mut matrix = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                matrix[col * 4 + row] = self.matrix[row * 4 + col];
            }
        }
        Self { matrix }
    }

    /// Apply the transform to the point `(x, y, z, 1)`.
    ///
    /// The homogeneous coordinate of the result is dropped, not divided by.
    pub fn transform_point(&self, point: Vector3f) -> Vector3f {
        let m = &self.matrix;
        Vector3f::new(
            m[0] * point.x + m[1] * point.y + m[2] * point.z + m[3],
            m[4] * point.x + m[5] * point.y + m[6] * point.z + m[7],
            m[8] * point.x + m[9] * point.y + m[10] * point.z + m[11],
        )
    }

    /// Apply only the linear part of the transform, ignoring translation
    pub fn transform_direction(&self, direction: Vector3f) -> Vector3f {
        let m = &self.matrix;
        Vector3f::new(
            m[0] * direction.x + m[1] * direction.y + m[2] * direction.z,
            m[4] * direction.x + m[5] * direction.y + m[6] * direction.z,
            m[8] * direction.x + m[9] * direction.y + m[10] * direction.z,
        )
    }

    /// Combine with another transform: `self = self * other`.
    ///
    /// The result applies `other` first, then the previous `self`.
    pub fn combine(&mut self, other: &Transform3) -> &mut Self {
        let a = &self.matrix;
        let b = &other.matrix;
        let mut matrix = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                matrix[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }
        self.matrix = matrix;
        self
    }

    pub fn translate(&mut self, offset: Vector3f) -> &mut Self {
        self.combine(&Self::translation(offset))
    }

    pub fn rotate_x(&mut self, angle: Angle) -> &mut Self {
        self.combine(&Self::rotation_x(angle))
    }

    pub fn rotate_y(&mut self, angle: Angle) -> &mut Self {
        self.combine(&Self::rotation_y(angle))
    }

    pub fn rotate_z(&mut self, angle: Angle) -> &mut Self {
        self.combine(&Self::rotation_z(angle))
    }

    /// Rotate around the X axis passing through `center`.
    ///
    /// Same result as translating `center` to the origin, rotating and
    /// translating back, in a single combination.
    pub fn rotate_x_around(&mut self, angle: Angle, center: Vector3f) -> &mut Self {
        self.combine(&Self::pivoted(Self::rotation_x(angle), center))
    }

    pub fn rotate_y_around(&mut self, angle: Angle, center: Vector3f) -> &mut Self {
        self.combine(&Self::pivoted(Self::rotation_y(angle), center))
    }

    pub fn rotate_z_around(&mut self, angle: Angle, center: Vector3f) -> &mut Self {
        self.combine(&Self::pivoted(Self::rotation_z(angle), center))
    }

    pub fn scale(&mut self, factors: Vector3f) -> &mut Self {
        self.combine(&Self::scaling(factors))
    }

    /// Scale relative to `center`, which stays in place
    pub fn scale_around(&mut self, factors: Vector3f, center: Vector3f) -> &mut Self {
        self.combine(&Self::pivoted(Self::scaling(factors), center))
    }
}

/// Laplace expansion of the determinant along the top two rows
fn expand(s: &[f32; 6], c: &[f32; 6]) -> f32 {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
}

impl Default for Transform3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3 {
    type Output = Transform3;

    fn mul(mut self, rhs: Transform3) -> Transform3 {
        self.combine(&rhs);
        self
    }
}

impl Mul<&Transform3> for &Transform3 {
    type Output = Transform3;

    fn mul(self, rhs: &Transform3) -> Transform3 {
        *self * *rhs
    }
}

impl MulAssign for Transform3 {
    fn mul_assign(&mut self, rhs: Transform3) {
        self.combine(&rhs);
    }
}

impl Mul<Vector3f> for Transform3 {
    type Output = Vector3f;

    fn mul(self, rhs: Vector3f) -> Vector3f {
        self.transform_point(rhs)
    }
}

impl Mul<Vector3f> for &Transform3 {
    type Output = Vector3f;

    fn mul(self, rhs: Vector3f) -> Vector3f {
        self.transform_point(rhs)
    }
}

impl From<Transform3> for Matrix4<f32> {
    fn from(transform: Transform3) -> Self {
        Matrix4::from_row_slice(&transform.matrix)
    }
}

impl From<Matrix4<f32>> for Transform3 {
    fn from(matrix: Matrix4<f32>) -> Self {
        let mut elements = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                elements[row * 4 + col] = matrix[(row, col)];
            }
        }
        Self::from_row_major(elements)
    }
}

impl fmt::Display for Transform3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.matrix.chunks_exact(4).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{} {} {} {}]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}
