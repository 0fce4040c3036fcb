use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::transform::Transform2;
use crate::math::arc_2d::{circle_point, sweep_offset, vector_angle};
use crate::math::distance_2d::point_to_arc_dist;
use crate::math::intersect_2d::circle_circle_intersect_2d;
use crate::math::{Point2, Vector2, ACCURACY};

/// A circular arc defined by its center, radius, start angle and signed
/// angle extent (positive = counter-clockwise).
///
/// The local parameter `t ∈ [0, |extent|]` is the angle travelled from the
/// start point in the direction of the arc.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleArc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    extent: f64,
}

impl CircleArc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive,
    /// the extent is zero, or the extent exceeds a full turn.
    pub fn new(center: Point2, radius: f64, start_angle: f64, extent: f64) -> Result<Self> {
        if radius < ACCURACY {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if (radius * extent).abs() < ACCURACY {
            return Err(GeometryError::Degenerate("arc has zero sweep".into()).into());
        }
        if extent.abs() > TAU + 1e-12 {
            return Err(GeometryError::Degenerate(format!(
                "arc extent {extent} exceeds a full turn"
            ))
            .into());
        }
        Ok(Self::from_parts(center, radius, start_angle, extent))
    }

    /// Creates a full counter-clockwise circle starting at angle 0.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive.
    pub fn circle(center: Point2, radius: f64) -> Result<Self> {
        Self::new(center, radius, 0.0, TAU)
    }

    pub(crate) fn from_parts(center: Point2, radius: f64, start_angle: f64, extent: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            extent,
        }
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Signed angle extent; positive for counter-clockwise arcs.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.extent > 0.0
    }

    fn sign(&self) -> f64 {
        if self.extent >= 0.0 {
            1.0
        } else {
            -1.0
        }
    }

    #[must_use]
    pub fn t1(&self) -> f64 {
        self.extent.abs()
    }

    /// Absolute angle reached at local parameter `t`.
    #[must_use]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + self.sign() * t
    }

    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        circle_point(&self.center, self.radius, self.angle_at(t))
    }

    /// Unit tangent in the direction of travel at local parameter `t`.
    #[must_use]
    pub fn tangent(&self, t: f64) -> Vector2 {
        let (s, c) = self.angle_at(t).sin_cos();
        Vector2::new(-s, c) * self.sign()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.extent.abs()
    }

    /// Returns `true` if the direction from the center to `p` lies within
    /// the angular range of the arc.
    #[must_use]
    pub fn contains_point_angle(&self, p: &Point2) -> bool {
        let v = p - self.center;
        sweep_offset(
            v.y.atan2(v.x),
            self.start_angle,
            self.extent,
            ACCURACY / self.radius,
        )
        .is_some()
    }

    /// Local parameter of the projection of `p`; points outside the angular
    /// range project to the nearer end.
    #[must_use]
    pub fn position(&self, p: &Point2) -> f64 {
        let v = p - self.center;
        if let Some(t) = sweep_offset(
            v.y.atan2(v.x),
            self.start_angle,
            self.extent,
            ACCURACY / self.radius,
        ) {
            return t;
        }
        let t_end = self.t1();
        if (p - self.point(0.0)).norm() <= (p - self.point(t_end)).norm() {
            0.0
        } else {
            t_end
        }
    }

    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        point_to_arc_dist(p, &self.center, self.radius, self.start_angle, self.extent)
    }

    /// Distance to `p`, positive when `p` lies on the right of the travel
    /// direction (outside a CCW arc, inside a CW arc).
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        let outside = (p - self.center).norm() > self.radius;
        let d = self.distance(p);
        if outside == self.is_ccw() {
            d
        } else {
            -d
        }
    }

    pub(super) fn intersect_arc(&self, other: &Self) -> Vec<Point2> {
        circle_circle_intersect_2d(&self.center, self.radius, &other.center, other.radius)
            .into_iter()
            .filter(|p| self.contains_point_angle(p) && other.contains_point_angle(p))
            .collect()
    }

    /// Offsets the arc by `d` to its right.
    ///
    /// The right side of a CCW arc is outside, so its radius grows. When the
    /// new radius is not positive the arc collapses; it is replaced by the
    /// chord through its reflected end points, or `None` if that chord is
    /// degenerate.
    #[must_use]
    pub fn parallel(&self, d: f64) -> Option<super::Element> {
        let new_radius = self.radius + self.sign() * d;
        if new_radius > ACCURACY {
            return Some(super::Element::Arc(Self::from_parts(
                self.center,
                new_radius,
                self.start_angle,
                self.extent,
            )));
        }
        let p0 = circle_point(&self.center, new_radius, self.angle_at(0.0));
        let p1 = circle_point(&self.center, new_radius, self.angle_at(self.t1()));
        super::Segment::new(p0, p1).ok().map(super::Element::Segment)
    }

    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::from_parts(
            self.center,
            self.radius,
            self.start_angle + self.extent,
            -self.extent,
        )
    }

    #[must_use]
    pub fn sub_range(&self, t0: f64, t1: f64) -> Self {
        Self::from_parts(
            self.center,
            self.radius,
            self.angle_at(t0),
            self.sign() * (t1 - t0),
        )
    }

    /// Applies a similarity transform.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotCirculinear` if the transform would turn
    /// the circle into an ellipse.
    pub fn transform(&self, transform: &Transform2) -> Result<Self> {
        let scale = transform.similarity_scale().ok_or_else(|| {
            GeometryError::NotCirculinear("arc under a non-similarity transform".into())
        })?;
        let start_dir = transform.apply_vector(&Vector2::new(
            self.start_angle.cos(),
            self.start_angle.sin(),
        ));
        let extent = if transform.is_reflection() {
            -self.extent
        } else {
            self.extent
        };
        Ok(Self::from_parts(
            transform.apply_point(&self.center),
            self.radius * scale,
            vector_angle(&start_dir),
            extent,
        ))
    }
}
