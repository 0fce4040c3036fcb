use crate::math::{Matrix3, Point2, Vector2, ACCURACY};

/// A 2D affine transform stored as a homogeneous 3x3 matrix.
///
/// Circular arcs only survive similarities (rotation, translation, uniform
/// scale, mirror); [`Transform2::similarity_scale`] tells them apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    matrix: Matrix3,
}

impl Transform2 {
    /// Wraps an arbitrary homogeneous matrix.
    #[must_use]
    pub fn from_matrix(matrix: Matrix3) -> Self {
        Self { matrix }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_matrix(Matrix3::identity())
    }

    /// Translation by `(dx, dy)`.
    #[must_use]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::from_matrix(Matrix3::new(1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0))
    }

    /// Counter-clockwise rotation by `angle` radians about the origin.
    #[must_use]
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_matrix(Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0))
    }

    /// Counter-clockwise rotation by `angle` radians about `center`.
    #[must_use]
    pub fn rotation_about(center: &Point2, angle: f64) -> Self {
        Self::translation(-center.x, -center.y)
            .then(&Self::rotation(angle))
            .then(&Self::translation(center.x, center.y))
    }

    /// Uniform scaling about the origin.
    #[must_use]
    pub fn scaling(factor: f64) -> Self {
        Self::scaling_xy(factor, factor)
    }

    /// Axis-aligned scaling about the origin. Not a similarity unless
    /// `|sx| == |sy|`.
    #[must_use]
    pub fn scaling_xy(sx: f64, sy: f64) -> Self {
        Self::from_matrix(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
    }

    /// Reflection across the line through `origin` with direction `axis`.
    #[must_use]
    pub fn mirror(origin: &Point2, axis: &Vector2) -> Self {
        let len = axis.norm();
        if len < ACCURACY {
            return Self::identity();
        }
        let u = axis / len;
        let (a, b, c) = (u.x * u.x - u.y * u.y, 2.0 * u.x * u.y, u.y * u.y - u.x * u.x);
        Self::translation(-origin.x, -origin.y)
            .then(&Self::from_matrix(Matrix3::new(
                a, b, 0.0, b, c, 0.0, 0.0, 0.0, 1.0,
            )))
            .then(&Self::translation(origin.x, origin.y))
    }

    /// Returns the transform applying `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self::from_matrix(next.matrix * self.matrix)
    }

    /// The underlying homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        let m = &self.matrix;
        Point2::new(
            m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)],
            m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)],
        )
    }

    /// Applies the linear part of the transform to a vector.
    #[must_use]
    pub fn apply_vector(&self, v: &Vector2) -> Vector2 {
        let m = &self.matrix;
        Vector2::new(
            m[(0, 0)] * v.x + m[(0, 1)] * v.y,
            m[(1, 0)] * v.x + m[(1, 1)] * v.y,
        )
    }

    /// Returns the scale factor if the linear part is a scaled orthogonal
    /// matrix (a similarity), `None` otherwise.
    #[must_use]
    pub fn similarity_scale(&self) -> Option<f64> {
        let col0 = self.apply_vector(&Vector2::new(1.0, 0.0));
        let col1 = self.apply_vector(&Vector2::new(0.0, 1.0));
        let k0 = col0.norm();
        let k1 = col1.norm();
        if k0 < ACCURACY {
            return None;
        }
        let tol = ACCURACY * k0.max(1.0);
        if (k0 - k1).abs() > tol || col0.dot(&col1).abs() > tol * k0 {
            return None;
        }
        Some(k0)
    }

    /// Returns `true` if the transform flips orientation.
    #[must_use]
    pub fn is_reflection(&self) -> bool {
        let m = &self.matrix;
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)] < 0.0
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}
