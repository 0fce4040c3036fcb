mod parametrization;

pub use parametrization::{from_unit_segment, to_unit_segment};

use std::f64::consts::TAU;

use crate::error::{CurveError, OperationError, Result};
use crate::geometry::element::Element;
use crate::geometry::pline::Pline;
use crate::geometry::traits::{Offsettable, Parametrized};
use crate::geometry::transform::Transform2;
use crate::math::arc_2d::{ccw_angle, signed_angle, vector_angle};
use crate::math::{coincident, Point2};
use crate::operations::offset::ParallelCurve2D;

/// A chain of elements where each element ends where the next one starts.
///
/// Only the first element may be unbounded at its start and only the last
/// one at its end. The curve is closed when it is bounded and its last point
/// coincides with its first point.
///
/// Global positions follow a stride-of-2 layout: element `i` covers
/// `[2i, 2i + 1]`, so the end of one element and the start of the next are
/// distinct positions even though they are the same point.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousCurve {
    elements: Vec<Element>,
    closed: bool,
}

impl ContinuousCurve {
    /// Creates a curve from a chain of elements.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Empty` for an empty chain,
    /// `CurveError::UnboundedInterior` if an infinite end appears anywhere but
    /// at the extremities, and `CurveError::Discontinuous` if two consecutive
    /// elements do not meet.
    pub fn new(elements: Vec<Element>) -> Result<Self> {
        if elements.is_empty() {
            return Err(CurveError::Empty.into());
        }
        let n = elements.len();
        for (index, e) in elements.iter().enumerate() {
            let open_start = index > 0 && e.first_point().is_none();
            let open_end = index + 1 < n && e.last_point().is_none();
            if open_start || open_end {
                return Err(CurveError::UnboundedInterior { index }.into());
            }
        }
        for (index, pair) in elements.windows(2).enumerate() {
            if let (Some(a), Some(b)) = (pair[0].last_point(), pair[1].first_point()) {
                if !coincident(&a, &b) {
                    return Err(CurveError::Discontinuous {
                        index,
                        gap: (a - b).norm(),
                    }
                    .into());
                }
            }
        }
        Ok(Self::from_chain(elements))
    }

    /// Builds an open polyline through `points`, skipping repeated points.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Empty` when fewer than two distinct points remain.
    pub fn polyline(points: &[Point2]) -> Result<Self> {
        Pline::from_points(points, false).to_curve()
    }

    /// Builds a closed polygon through `points`, skipping repeated points
    /// and a repeated closing point.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Empty` when fewer than two distinct points remain.
    pub fn polygon(points: &[Point2]) -> Result<Self> {
        Pline::from_points(points, true).to_curve()
    }

    /// Wraps a chain known to be continuous; closure is detected from its
    /// end points.
    pub(crate) fn from_chain(elements: Vec<Element>) -> Self {
        let closed = match (
            elements.first().and_then(Parametrized::first_point),
            elements.last().and_then(Parametrized::last_point),
        ) {
            (Some(a), Some(b)) => coincident(&a, &b),
            _ => false,
        };
        Self { elements, closed }
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Global position of local parameter `t` on element `index`.
    #[must_use]
    pub fn global_position(&self, index: usize, t: f64) -> f64 {
        let e = &self.elements[index];
        parametrization::global_position(index, t, e.t0(), e.t1())
    }

    /// Element index and local parameter of global position `t`.
    #[must_use]
    pub fn local_position(&self, t: f64) -> (usize, f64) {
        let index = parametrization::element_index(t, self.elements.len());
        let e = &self.elements[index];
        let u = parametrization::unit_fraction(t, index);
        (index, from_unit_segment(u, e.t0(), e.t1()))
    }

    /// Points `step` (arc length) before and after global position `t`.
    ///
    /// Near a junction the point on the other side is taken on the
    /// neighbouring element; at an open end the element is extended along
    /// its support line or circle.
    pub(crate) fn points_around(&self, t: f64, step: f64) -> (Point2, Point2) {
        let n = self.elements.len();
        let (index, local) = self.local_position(t);
        let e = &self.elements[index];
        let speed = e.speed();

        let behind = (local - e.t0()) * speed;
        let previous = if index > 0 {
            Some(index - 1)
        } else if self.closed {
            Some(n - 1)
        } else {
            None
        };
        let before = match previous {
            Some(p) if behind < step => {
                let prev = &self.elements[p];
                prev.point(prev.t1() - (step - behind) / prev.speed())
            }
            _ => e.point(local - step / speed),
        };

        let ahead = (e.t1() - local) * speed;
        let next = if index + 1 < n {
            Some(index + 1)
        } else if self.closed {
            Some(0)
        } else {
            None
        };
        let after = match next {
            Some(q) if ahead < step => {
                let following = &self.elements[q];
                following.point(following.t0() + (step - ahead) / following.speed())
            }
            _ => e.point(local + step / speed),
        };
        (before, after)
    }

    /// Returns the part of the curve between global positions `t0` and `t1`.
    ///
    /// On a closed curve `t0 > t1` wraps through the junction of the last
    /// and first elements. Pieces shorter than the geometric tolerance are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for `t0 > t1` on an open curve
    /// and `CurveError::Empty` if the range selects nothing.
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Result<Self> {
        let mut out = Vec::new();
        if t0 <= t1 {
            self.append_range(t0, t1, &mut out);
        } else if self.closed {
            self.append_range(t0, self.t1(), &mut out);
            self.append_range(self.t0(), t1, &mut out);
        } else {
            return Err(OperationError::InvalidInput(format!(
                "range [{t0}, {t1}] is reversed on an open curve"
            ))
            .into());
        }
        if out.is_empty() {
            return Err(CurveError::Empty.into());
        }
        Ok(Self::from_chain(out))
    }

    /// Appends the elements covering `[t0, t1]` (with `t0 <= t1`) to `out`.
    pub(crate) fn append_range(&self, t0: f64, t1: f64, out: &mut Vec<Element>) {
        let n = self.elements.len();
        let i0 = parametrization::element_index(t0, n);
        let i1 = parametrization::element_index(t1, n);
        let u0 = parametrization::unit_fraction(t0, i0);
        let u1 = parametrization::unit_fraction(t1, i1);
        for i in i0..=i1 {
            let e = &self.elements[i];
            let lo = if i == i0 { u0 } else { 0.0 };
            let hi = if i == i1 { u1 } else { 1.0 };
            if hi <= lo {
                continue;
            }
            let piece = if lo <= 0.0 && hi >= 1.0 {
                e.clone()
            } else {
                e.sub_range(
                    from_unit_segment(lo, e.t0(), e.t1()),
                    from_unit_segment(hi, e.t0(), e.t1()),
                )
            };
            if !piece.is_degenerate() {
                out.push(piece);
            }
        }
    }

    /// Same path travelled in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            elements: self.elements.iter().rev().map(Element::reverse).collect(),
            closed: self.closed,
        }
    }

    /// Finite element end points, without repeats; the closing point of a
    /// closed curve is listed once.
    #[must_use]
    pub fn singular_points(&self) -> Vec<Point2> {
        let mut points: Vec<Point2> = Vec::with_capacity(self.elements.len() + 1);
        let mut push = |p: Point2| {
            if !points.last().is_some_and(|q| coincident(q, &p)) {
                points.push(p);
            }
        };
        for e in &self.elements {
            if let Some(p) = e.first_point() {
                push(p);
            }
        }
        if !self.closed {
            if let Some(p) = self.last_point() {
                push(p);
            }
        }
        points
    }

    /// Points used to test whether a piece of curve stays far enough from
    /// another shape: singular points and element midpoints.
    #[must_use]
    pub fn sample_points(&self) -> Vec<Point2> {
        let mut points = self.singular_points();
        points.extend(self.elements.iter().filter_map(Element::midpoint));
        if points.is_empty() {
            points.push(self.point(self.t1() * 0.5));
        }
        points
    }

    /// Minimum distance from `p` to the curve.
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        self.elements
            .iter()
            .map(|e| e.distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Intersection points with every element of `other`, deduplicated.
    #[must_use]
    pub fn intersections(&self, other: &Self) -> Vec<Point2> {
        let mut points: Vec<Point2> = Vec::new();
        for a in &self.elements {
            for b in &other.elements {
                for p in a.intersections(b) {
                    if !points.iter().any(|q| coincident(q, &p)) {
                        points.push(p);
                    }
                }
            }
        }
        points
    }

    /// Signed area enclosed by a closed curve, positive when counter-clockwise.
    /// Open curves are closed by their chord.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.elements.iter().map(Element::area_term).sum()
    }

    /// Total angle swept by the curve as seen from `p`, closing open curves.
    ///
    /// Bounded open curves are closed by their chord. A curve unbounded at
    /// both ends is closed counter-clockwise at infinity, from its end
    /// direction to the direction its start comes from.
    #[must_use]
    pub fn winding_angle(&self, p: &Point2) -> f64 {
        let along = self.travel_angle(p);
        if self.closed {
            return along;
        }
        let (Some(first), Some(last)) = (self.elements.first(), self.elements.last()) else {
            return along;
        };
        let start_dir = first.start_tangent();
        let end_dir = last.end_tangent();
        let closing = match (first.first_point(), last.last_point()) {
            (Some(a), Some(b)) => signed_angle(&(b - p), &(a - p)),
            (Some(a), None) => signed_angle(&end_dir, &(a - p)),
            (None, Some(b)) => signed_angle(&(b - p), &-start_dir),
            (None, None) => ccw_angle(vector_angle(&end_dir), vector_angle(&-start_dir)),
        };
        along + closing
    }

    /// Angle swept by the elements alone, as seen from `p`.
    #[must_use]
    pub fn travel_angle(&self, p: &Point2) -> f64 {
        self.elements.iter().map(|e| e.winding_angle(p)).sum()
    }

    /// For a curve unbounded at both ends: the angle of the direction its
    /// start comes from and the angle of the direction its end goes to.
    #[must_use]
    pub fn angles_at_infinity(&self) -> Option<(f64, f64)> {
        if self.first_point().is_some() || self.last_point().is_some() {
            return None;
        }
        let first = self.elements.first()?;
        let last = self.elements.last()?;
        Some((
            vector_angle(&-first.start_tangent()),
            vector_angle(&last.end_tangent()),
        ))
    }

    /// Number of times the curve (closed as in [`Self::winding_angle`])
    /// turns around `p`.
    #[must_use]
    pub fn winding_number(&self, p: &Point2) -> i32 {
        #[allow(clippy::cast_possible_truncation)]
        let turns = (self.winding_angle(p) / TAU).round() as i32;
        turns
    }

    /// Applies a transform to every element.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotCirculinear` if an arc would become an
    /// ellipse.
    pub fn transform(&self, transform: &Transform2) -> Result<Self> {
        let elements = self
            .elements
            .iter()
            .map(|e| e.transform(transform))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            elements,
            closed: self.closed,
        })
    }
}

impl Parametrized for ContinuousCurve {
    fn t0(&self) -> f64 {
        0.0
    }

    #[allow(clippy::cast_precision_loss)]
    fn t1(&self) -> f64 {
        2.0 * self.elements.len() as f64 - 1.0
    }

    fn point(&self, t: f64) -> Point2 {
        let (index, local) = self.local_position(t);
        self.elements[index].point(local)
    }

    fn position(&self, point: &Point2) -> f64 {
        let mut best = (0, f64::INFINITY);
        for (i, e) in self.elements.iter().enumerate() {
            let d = e.distance(point);
            if d < best.1 {
                best = (i, d);
            }
        }
        let e = &self.elements[best.0];
        self.global_position(best.0, e.position(point))
    }

    fn length(&self) -> f64 {
        self.elements.iter().map(Parametrized::length).sum()
    }

    fn first_point(&self) -> Option<Point2> {
        self.elements.first().and_then(Parametrized::first_point)
    }

    fn last_point(&self) -> Option<Point2> {
        self.elements.last().and_then(Parametrized::last_point)
    }
}

impl Offsettable for ContinuousCurve {
    type Output = Result<ContinuousCurve>;

    /// Raw parallel curve: offset elements joined by circular arcs on convex
    /// corners. Self-intersections are kept.
    fn parallel(&self, distance: f64) -> Result<ContinuousCurve> {
        ParallelCurve2D::new(self.clone(), distance).execute()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::element::{CircleArc, Segment};
    use crate::math::Vector2;

    fn square(size: f64) -> ContinuousCurve {
        ContinuousCurve::polygon(&[
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ])
        .unwrap()
    }

    #[test]
    fn discontinuous_chain_is_rejected() {
        let a = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        let b = Segment::new(Point2::new(2.0, 0.0), Point2::new(3.0, 0.0)).unwrap();
        let err = ContinuousCurve::new(vec![a.into(), b.into()]).unwrap_err();
        assert!(err.to_string().contains("gap"), "err={err}");
    }

    #[test]
    fn interior_ray_is_rejected() {
        let ray = Segment::ray(Point2::origin(), Vector2::new(1.0, 0.0)).unwrap();
        let seg = Segment::new(Point2::new(5.0, 0.0), Point2::new(5.0, 1.0)).unwrap();
        assert!(ContinuousCurve::new(vec![ray.into(), seg.into()]).is_err());
    }

    #[test]
    fn polygon_is_closed_with_ccw_area() {
        let sq = square(2.0);
        assert!(sq.is_closed());
        assert_eq!(sq.element_count(), 4);
        assert_relative_eq!(sq.signed_area(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(sq.reversed().signed_area(), -4.0, epsilon = 1e-12);
        assert_eq!(sq.singular_points().len(), 4);
    }

    #[test]
    fn global_positions_use_stride_two() {
        let sq = square(2.0);
        assert_relative_eq!(sq.t1(), 7.0);
        let p = sq.point(2.5);
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(sq.position(&Point2::new(2.5, 1.0)), 2.5, epsilon = 1e-12);
        assert_eq!(sq.local_position(2.5).0, 1);
    }

    #[test]
    fn sub_curve_wraps_on_closed_curves() {
        let sq = square(2.0);
        let piece = sq.sub_curve(6.5, 0.5).unwrap();
        assert_eq!(piece.element_count(), 2);
        let start = piece.first_point().unwrap();
        let end = piece.last_point().unwrap();
        assert_relative_eq!(start.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(end.x, 1.0, epsilon = 1e-12);
        assert!(!piece.is_closed());
        assert!(sq.reversed().sub_curve(3.0, 1.0).is_ok());
    }

    #[test]
    fn sub_curve_rejects_reversed_range_on_open_curve() {
        let line = ContinuousCurve::polyline(&[Point2::origin(), Point2::new(1.0, 0.0)]).unwrap();
        assert!(line.sub_curve(0.8, 0.2).is_err());
    }

    #[test]
    fn winding_of_closed_and_unbounded_curves() {
        let sq = square(2.0);
        assert_eq!(sq.winding_number(&Point2::new(1.0, 1.0)), 1);
        assert_eq!(sq.winding_number(&Point2::new(3.0, 1.0)), 0);

        let line: Element = Segment::line(Point2::origin(), Vector2::new(1.0, 0.0))
            .unwrap()
            .into();
        let curve = ContinuousCurve::new(vec![line]).unwrap();
        assert_eq!(curve.winding_number(&Point2::new(0.0, 1.0)), 1);
        assert_eq!(curve.winding_number(&Point2::new(0.0, -1.0)), 0);
    }

    #[test]
    fn unbounded_v_shape_winding() {
        // Comes down from the upper left, leaves towards the upper right.
        let a = Segment::from_parts(
            Point2::origin(),
            Vector2::new(1.0, -1.0).normalize(),
            f64::NEG_INFINITY,
            0.0,
        );
        let b = Segment::ray(Point2::origin(), Vector2::new(1.0, 1.0)).unwrap();
        let v = ContinuousCurve::new(vec![a.into(), b.into()]).unwrap();
        assert!(!v.is_closed());
        assert_eq!(v.winding_number(&Point2::new(0.0, 1.0)), 1);
        assert_eq!(v.winding_number(&Point2::new(0.0, -1.0)), 0);
        assert_eq!(v.singular_points().len(), 1);
    }

    #[test]
    fn circle_curve_length_and_samples() {
        let circle: Element = CircleArc::circle(Point2::origin(), 1.0).unwrap().into();
        let c = ContinuousCurve::new(vec![circle]).unwrap();
        assert!(c.is_closed());
        assert_relative_eq!(c.length(), 2.0 * PI, epsilon = 1e-12);
        assert_eq!(c.sample_points().len(), 2);
        assert_relative_eq!(c.distance(&Point2::new(3.0, 0.0)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn crossing_squares_intersect_twice() {
        let a = square(2.0);
        let b = a.transform(&Transform2::translation(1.0, 1.0)).unwrap();
        assert_eq!(a.intersections(&b).len(), 2);
    }
}
