use crate::geometry::curve::ContinuousCurve;
use crate::geometry::element::Element;
use crate::geometry::traits::Parametrized;
use crate::math::arc_2d::{ccw_angle, vector_angle};
use crate::math::Point2;

/// Arc length used to look at the two curves on each side of a contact.
pub(super) fn contact_step(a: &Element, b: &Element) -> f64 {
    1e-4 * a.length().min(b.length()).min(1.0)
}

/// Returns `true` if `b` passes from one side of `a` to the other at
/// `point`, where `a` is at global position `ta` and `b` at `tb`.
///
/// The two rays of `a` leaving `point` split the plane around it into two
/// sectors; a crossing puts the rays of `b` in different sectors. Tangent
/// touches leave both rays of `b` in the same sector.
pub(super) fn is_crossing(
    a: &ContinuousCurve,
    ta: f64,
    b: &ContinuousCurve,
    tb: f64,
    point: &Point2,
    step: f64,
) -> bool {
    let (a_before, a_after) = a.points_around(ta, step);
    let (b_before, b_after) = b.points_around(tb, step);
    let angle = |q: &Point2| vector_angle(&(q - point));
    let base = angle(&a_after);
    let split = ccw_angle(base, angle(&a_before));
    let side = |q: &Point2| ccw_angle(base, angle(q)) < split;
    side(&b_before) != side(&b_after)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::element::CircleArc;

    fn circle(x: f64, y: f64, r: f64) -> ContinuousCurve {
        let arc: Element = CircleArc::circle(Point2::new(x, y), r).unwrap().into();
        ContinuousCurve::new(vec![arc]).unwrap()
    }

    fn polyline(points: &[(f64, f64)]) -> ContinuousCurve {
        let pts: Vec<Point2> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        ContinuousCurve::polyline(&pts).unwrap()
    }

    #[test]
    fn transversal_segments_cross() {
        let a = polyline(&[(-1.0, 0.0), (1.0, 0.0)]);
        let b = polyline(&[(0.0, -1.0), (0.0, 1.0)]);
        let p = Point2::origin();
        assert!(is_crossing(&a, a.position(&p), &b, b.position(&p), &p, 1e-4));
        assert!(is_crossing(&b, b.position(&p), &a, a.position(&p), &p, 1e-4));
    }

    #[test]
    fn external_tangent_circles_only_touch() {
        // Contact at the start point of the first circle.
        let a = circle(0.0, 0.0, 1.5);
        let b = circle(2.0, 0.0, 0.5).reversed();
        let p = Point2::new(1.5, 0.0);
        assert!(!is_crossing(&a, 0.0, &b, b.position(&p), &p, 1e-4));
        assert!(!is_crossing(&b, b.position(&p), &a, 0.0, &p, 1e-4));
    }

    #[test]
    fn line_tangent_to_circle_only_touches() {
        let a = circle(0.0, 0.0, 1.0);
        let b = polyline(&[(-2.0, 1.0), (2.0, 1.0)]);
        let p = Point2::new(0.0, 1.0);
        assert!(!is_crossing(&a, a.position(&p), &b, b.position(&p), &p, 1e-4));
    }

    #[test]
    fn corner_through_a_segment_crosses() {
        // The vertex of the V lies on the segment and the V passes through.
        let a = polyline(&[(-2.0, 0.0), (2.0, 0.0)]);
        let b = polyline(&[(-1.0, 1.0), (0.0, 0.0), (1.0, -1.0)]);
        let p = Point2::origin();
        assert!(is_crossing(&a, a.position(&p), &b, 1.0, &p, 1e-4));
        // A V bouncing off the segment only touches it.
        let bounce = polyline(&[(-1.0, 1.0), (0.0, 0.0), (1.0, 1.0)]);
        assert!(!is_crossing(&a, a.position(&p), &bounce, 1.0, &p, 1e-4));
    }
}
