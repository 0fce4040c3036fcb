use crate::error::{GeometryError, Result};
use crate::geometry::transform::Transform2;
use crate::math::distance_2d::point_to_line_dist;
use crate::math::intersect_2d::{line_circle_intersect_2d, line_line_intersect_2d};
use crate::math::{cross, right_normal, Point2, Vector2, ACCURACY};

use super::CircleArc;

/// A straight element: `P(t) = origin + t * direction`, `t ∈ [t0, t1]`.
///
/// Bounded segments built from two points use the unit range `[0, 1]`.
/// Rays use `[0, ∞)` and infinite lines `(-∞, ∞)`, both with a unit
/// direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    origin: Point2,
    direction: Vector2,
    t0: f64,
    t1: f64,
}

impl Segment {
    /// Creates the bounded segment from `p0` to `p1`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the points coincide.
    pub fn new(p0: Point2, p1: Point2) -> Result<Self> {
        let direction = p1 - p0;
        if direction.norm() < ACCURACY {
            return Err(GeometryError::Degenerate(format!(
                "zero-length segment at ({}, {})",
                p0.x, p0.y
            ))
            .into());
        }
        Ok(Self::from_parts(p0, direction, 0.0, 1.0))
    }

    /// Creates a ray starting at `origin` and extending to infinity.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if `direction` is zero-length.
    pub fn ray(origin: Point2, direction: Vector2) -> Result<Self> {
        let unit = direction
            .try_normalize(ACCURACY)
            .ok_or(GeometryError::ZeroVector)?;
        Ok(Self::from_parts(origin, unit, 0.0, f64::INFINITY))
    }

    /// Creates the infinite line through `origin` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if `direction` is zero-length.
    pub fn line(origin: Point2, direction: Vector2) -> Result<Self> {
        let unit = direction
            .try_normalize(ACCURACY)
            .ok_or(GeometryError::ZeroVector)?;
        Ok(Self::from_parts(
            origin,
            unit,
            f64::NEG_INFINITY,
            f64::INFINITY,
        ))
    }

    pub(crate) fn from_parts(origin: Point2, direction: Vector2, t0: f64, t1: f64) -> Self {
        Self {
            origin,
            direction,
            t0,
            t1,
        }
    }

    /// Returns the origin point (the point at `t = 0`).
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the (non-normalized) direction vector.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    #[must_use]
    pub fn t0(&self) -> f64 {
        self.t0
    }

    #[must_use]
    pub fn t1(&self) -> f64 {
        self.t1
    }

    /// Evaluates the point at parameter `t` (must be finite).
    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// Unit tangent, constant along the element.
    #[must_use]
    pub fn tangent(&self) -> Vector2 {
        self.direction
            .try_normalize(0.0)
            .unwrap_or_else(|| Vector2::new(1.0, 0.0))
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction.norm() * (self.t1 - self.t0)
    }

    /// Parameter of the orthogonal projection of `p`, clamped into the range.
    #[must_use]
    pub fn position(&self, p: &Point2) -> f64 {
        let len_sq = self.direction.norm_squared();
        if len_sq < 1e-20 {
            return self.t0;
        }
        ((p - self.origin).dot(&self.direction) / len_sq).clamp(self.t0, self.t1)
    }

    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        point_to_line_dist(p, &self.origin, &self.direction, self.t0, self.t1)
    }

    /// Distance to `p`, positive when `p` lies on the right of the direction.
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        let d = self.distance(p);
        if cross(&self.direction, &(p - self.origin)) > 0.0 {
            -d
        } else {
            d
        }
    }

    /// Returns `true` if `t` lies in the parameter range, with a tolerance
    /// of [`ACCURACY`] measured along the element.
    #[must_use]
    pub fn contains_param(&self, t: f64) -> bool {
        let eps = ACCURACY / self.direction.norm().max(ACCURACY);
        t >= self.t0 - eps && t <= self.t1 + eps
    }

    pub(super) fn intersect_segment(&self, other: &Self) -> Option<Point2> {
        let (t, u) =
            line_line_intersect_2d(&self.origin, &self.direction, &other.origin, &other.direction)?;
        if self.contains_param(t) && other.contains_param(u) {
            Some(self.point(t.clamp(self.t0, self.t1)))
        } else {
            None
        }
    }

    pub(super) fn intersect_arc(&self, arc: &CircleArc) -> Vec<Point2> {
        line_circle_intersect_2d(&self.origin, &self.direction, arc.center(), arc.radius())
            .into_iter()
            .filter(|&t| self.contains_param(t))
            .map(|t| self.point(t.clamp(self.t0, self.t1)))
            .filter(|p| arc.contains_point_angle(p))
            .collect()
    }

    /// Offsets the element by `d` to its right. Returns `None` for a
    /// zero-length element.
    #[must_use]
    pub fn parallel(&self, d: f64) -> Option<Self> {
        let unit = self.direction.try_normalize(ACCURACY)?;
        if self.length() < ACCURACY {
            return None;
        }
        Some(Self::from_parts(
            self.origin + right_normal(&unit) * d,
            self.direction,
            self.t0,
            self.t1,
        ))
    }

    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::from_parts(self.origin, -self.direction, -self.t1, -self.t0)
    }

    #[must_use]
    pub fn sub_range(&self, t0: f64, t1: f64) -> Self {
        Self::from_parts(self.origin, self.direction, t0, t1)
    }

    #[must_use]
    pub fn transform(&self, transform: &Transform2) -> Self {
        Self::from_parts(
            transform.apply_point(&self.origin),
            transform.apply_vector(&self.direction),
            self.t0,
            self.t1,
        )
    }
}
