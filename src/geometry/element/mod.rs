mod arc;
mod segment;

pub use arc::CircleArc;
pub use segment::Segment;

use std::f64::consts::PI;

use crate::error::Result;
use crate::geometry::traits::{Offsettable, Parametrized};
use crate::geometry::transform::Transform2;
use crate::math::arc_2d::signed_angle;
use crate::math::{cross, Point2, Vector2, ACCURACY};

/// Kind tag of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Segment,
    Arc,
}

/// A circulinear element: a straight element or a circular arc.
///
/// Every per-kind formula is dispatched here, so curve-level algorithms
/// never inspect the kind themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Segment(Segment),
    Arc(CircleArc),
}

impl Element {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Segment(_) => ElementKind::Segment,
            Self::Arc(_) => ElementKind::Arc,
        }
    }

    /// Unit tangent in the direction of travel at local parameter `t`.
    #[must_use]
    pub fn tangent(&self, t: f64) -> Vector2 {
        match self {
            Self::Segment(s) => s.tangent(),
            Self::Arc(a) => a.tangent(t),
        }
    }

    #[must_use]
    pub fn start_tangent(&self) -> Vector2 {
        self.tangent(self.t0())
    }

    #[must_use]
    pub fn end_tangent(&self) -> Vector2 {
        self.tangent(self.t1())
    }

    /// Point halfway along a bounded element, `None` if unbounded.
    #[must_use]
    pub fn midpoint(&self) -> Option<Point2> {
        let (t0, t1) = (self.t0(), self.t1());
        if t0.is_finite() && t1.is_finite() {
            Some(self.point((t0 + t1) * 0.5))
        } else {
            None
        }
    }

    /// Arc length travelled per unit of local parameter.
    #[must_use]
    pub fn speed(&self) -> f64 {
        match self {
            Self::Segment(s) => s.direction().norm(),
            Self::Arc(a) => a.radius(),
        }
    }

    /// Returns `true` for an element shorter than [`ACCURACY`].
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length() < ACCURACY
    }

    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        match self {
            Self::Segment(s) => s.distance(p),
            Self::Arc(a) => a.distance(p),
        }
    }

    /// Distance to `p`, positive on the right side of the element.
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        match self {
            Self::Segment(s) => s.signed_distance(p),
            Self::Arc(a) => a.signed_distance(p),
        }
    }

    /// Intersection points with another element: 0, 1 or 2 points.
    ///
    /// Overlapping collinear segments and arcs on a common circle have no
    /// isolated intersection point and yield none.
    #[must_use]
    pub fn intersections(&self, other: &Self) -> Vec<Point2> {
        match (self, other) {
            (Self::Segment(a), Self::Segment(b)) => a.intersect_segment(b).into_iter().collect(),
            (Self::Segment(a), Self::Arc(b)) | (Self::Arc(b), Self::Segment(a)) => {
                a.intersect_arc(b)
            }
            (Self::Arc(a), Self::Arc(b)) => a.intersect_arc(b),
        }
    }

    #[must_use]
    pub fn reverse(&self) -> Self {
        match self {
            Self::Segment(s) => Self::Segment(s.reverse()),
            Self::Arc(a) => Self::Arc(a.reverse()),
        }
    }

    /// Extracts the part of the element between local parameters `t0 <= t1`.
    #[must_use]
    pub fn sub_range(&self, t0: f64, t1: f64) -> Self {
        match self {
            Self::Segment(s) => Self::Segment(s.sub_range(t0, t1)),
            Self::Arc(a) => Self::Arc(a.sub_range(t0, t1)),
        }
    }

    /// Applies a transform.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotCirculinear` for an arc under a
    /// non-similarity transform.
    pub fn transform(&self, transform: &Transform2) -> Result<Self> {
        Ok(match self {
            Self::Segment(s) => Self::Segment(s.transform(transform)),
            Self::Arc(a) => Self::Arc(a.transform(transform)?),
        })
    }

    /// Signed contribution of the element to the area of a closed chain
    /// (Green's theorem). Zero for unbounded elements.
    #[must_use]
    pub fn area_term(&self) -> f64 {
        let (Some(p0), Some(p1)) = (self.first_point(), self.last_point()) else {
            return 0.0;
        };
        let chord = (p0.x * p1.y - p1.x * p0.y) * 0.5;
        match self {
            Self::Segment(_) => chord,
            Self::Arc(a) => {
                let theta = a.extent();
                chord + a.radius() * a.radius() * 0.5 * (theta - theta.sin())
            }
        }
    }

    /// Signed angle subtended by the element as seen from `p`.
    ///
    /// Unbounded ends are seen in the direction of the element at infinity.
    #[must_use]
    pub fn winding_angle(&self, p: &Point2) -> f64 {
        match self {
            Self::Segment(s) => {
                let dir = s.tangent();
                match (self.first_point(), self.last_point()) {
                    (Some(a), Some(b)) => signed_angle(&(a - p), &(b - p)),
                    (Some(a), None) => signed_angle(&(a - p), &dir),
                    (None, Some(b)) => signed_angle(&-dir, &(b - p)),
                    (None, None) => {
                        if cross(&dir, &(p - s.origin())) > 0.0 {
                            PI
                        } else {
                            -PI
                        }
                    }
                }
            }
            Self::Arc(a) => {
                let p0 = a.point(0.0);
                let p1 = a.point(a.t1());
                let mut angle = signed_angle(&(p0 - p), &(p1 - p));
                // Inside the circle, on the bulge side of the chord, the arc
                // wraps around `p` once more than its chord does.
                let inside = (p - a.center()).norm() < a.radius();
                let mid = a.point(a.t1() * 0.5);
                let chord = p1 - p0;
                let side_p = cross(&chord, &(p - p0));
                let side_mid = cross(&chord, &(mid - p0));
                let degenerate_chord = chord.norm() < ACCURACY;
                if inside && (degenerate_chord || side_p * side_mid > 0.0) {
                    angle += 2.0 * PI * a.extent().signum();
                }
                angle
            }
        }
    }
}

impl Parametrized for Element {
    fn t0(&self) -> f64 {
        match self {
            Self::Segment(s) => s.t0(),
            Self::Arc(_) => 0.0,
        }
    }

    fn t1(&self) -> f64 {
        match self {
            Self::Segment(s) => s.t1(),
            Self::Arc(a) => a.t1(),
        }
    }

    fn point(&self, t: f64) -> Point2 {
        match self {
            Self::Segment(s) => s.point(t),
            Self::Arc(a) => a.point(t),
        }
    }

    fn position(&self, point: &Point2) -> f64 {
        match self {
            Self::Segment(s) => s.position(point),
            Self::Arc(a) => a.position(point),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Segment(s) => s.length(),
            Self::Arc(a) => a.length(),
        }
    }

    fn first_point(&self) -> Option<Point2> {
        let t0 = self.t0();
        t0.is_finite().then(|| self.point(t0))
    }

    fn last_point(&self) -> Option<Point2> {
        let t1 = self.t1();
        t1.is_finite().then(|| self.point(t1))
    }
}

impl Offsettable for Element {
    type Output = Option<Element>;

    /// Offsets the element by `d` (positive = right side). `None` when the
    /// offset degenerates to a point.
    fn parallel(&self, d: f64) -> Option<Element> {
        match self {
            Self::Segment(s) => s.parallel(d).map(Self::Segment),
            Self::Arc(a) => a.parallel(d),
        }
    }
}

impl From<Segment> for Element {
    fn from(s: Segment) -> Self {
        Self::Segment(s)
    }
}

impl From<CircleArc> for Element {
    fn from(a: CircleArc) -> Self {
        Self::Arc(a)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, TAU};

    use approx::assert_relative_eq;

    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Element {
        Segment::new(Point2::new(x0, y0), Point2::new(x1, y1))
            .unwrap()
            .into()
    }

    #[test]
    fn segment_arc_intersections() {
        let circle: Element = CircleArc::circle(Point2::origin(), 1.0).unwrap().into();
        let line = seg(-2.0, 0.0, 2.0, 0.0);
        let hits = line.intersections(&circle);
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        // Same result regardless of argument order.
        assert_eq!(circle.intersections(&line).len(), 2);
    }

    #[test]
    fn arc_range_limits_intersections() {
        let upper: Element = CircleArc::new(Point2::origin(), 1.0, 0.1, 2.9).unwrap().into();
        let line = seg(-2.0, 0.0, 2.0, 0.0);
        assert!(line.intersections(&upper).is_empty());
    }

    #[test]
    fn square_area_terms() {
        let pts = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
        let area: f64 = (0..4)
            .map(|i| {
                let (a, b) = (pts[i], pts[(i + 1) % 4]);
                seg(a.0, a.1, b.0, b.1).area_term()
            })
            .sum();
        assert_relative_eq!(area, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn circle_area_term_is_translation_invariant() {
        let circle: Element = CircleArc::circle(Point2::new(5.0, -3.0), 2.0).unwrap().into();
        assert_relative_eq!(circle.area_term(), 4.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn full_circle_winds_once_around_center() {
        let circle: Element = CircleArc::circle(Point2::new(1.0, 1.0), 2.0).unwrap().into();
        assert_relative_eq!(circle.winding_angle(&Point2::new(1.5, 1.0)), TAU, epsilon = 1e-9);
        assert!(circle.winding_angle(&Point2::new(9.0, 1.0)).abs() < 1e-9);
    }

    #[test]
    fn infinite_line_subtends_half_turn() {
        let line: Element = Segment::line(Point2::origin(), Vector2::new(1.0, 0.0))
            .unwrap()
            .into();
        assert_relative_eq!(line.winding_angle(&Point2::new(0.0, 1.0)), PI);
        assert_relative_eq!(line.winding_angle(&Point2::new(0.0, -1.0)), -PI);
        assert!(line.first_point().is_none());
    }

    #[test]
    fn parallel_through_trait() {
        let arc: Element = CircleArc::new(Point2::origin(), 2.0, 0.0, FRAC_PI_2).unwrap().into();
        let out = arc.parallel(1.0).unwrap();
        assert_relative_eq!(out.distance(&Point2::origin()), 3.0, epsilon = 1e-12);
        assert_eq!(out.kind(), ElementKind::Arc);
    }

    #[test]
    fn signed_distance_matches_parallel_side() {
        let e = seg(0.0, 0.0, 10.0, 0.0);
        let p = e.parallel(2.5).unwrap().midpoint().unwrap();
        assert_relative_eq!(e.signed_distance(&p), 2.5, epsilon = 1e-12);
    }
}
