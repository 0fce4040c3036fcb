use std::f64::consts::PI;

use crate::geometry::element::{CircleArc, Element, Segment};
use crate::math::arc_2d::{ccw_angle, vector_angle};
use crate::math::{coincident, cross, Point2, Vector2, ACCURACY};

/// End cap style for buffers of open curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapStyle {
    /// Half circle around the end point.
    #[default]
    Round,
    /// Half square extending past the end point by the buffer distance.
    Square,
}

/// Returns `true` when the turn from `end_dir` to `start_dir` opens a gap
/// on the side offset by `distance` (a convex joint).
#[must_use]
pub fn is_convex(end_dir: &Vector2, start_dir: &Vector2, distance: f64) -> bool {
    let turn = cross(end_dir, start_dir);
    if turn.abs() < ACCURACY {
        return end_dir.dot(start_dir) < 0.0;
    }
    turn * distance > 0.0
}

/// Builds the element joining an offset element ending at `from` to the
/// next one starting at `to`, around the source junction `vertex`.
///
/// Convex joints get an arc of radius `|distance|` centered on the
/// junction; concave joints, and ends pulled away from the junction by a
/// collapsed arc, get a straight segment. Returns `None` when the ends
/// already meet.
#[must_use]
pub fn join(
    vertex: &Point2,
    from: &Point2,
    to: &Point2,
    end_dir: &Vector2,
    start_dir: &Vector2,
    distance: f64,
) -> Option<Element> {
    if coincident(from, to) {
        return None;
    }
    let radius = distance.abs();
    let on_circle =
        |p: &Point2| ((p - vertex).norm() - radius).abs() < ACCURACY * radius.max(1.0);
    if is_convex(end_dir, start_dir, distance) && on_circle(from) && on_circle(to) {
        let a0 = vector_angle(&(from - vertex));
        let a1 = vector_angle(&(to - vertex));
        let extent = if distance > 0.0 {
            ccw_angle(a0, a1)
        } else {
            -ccw_angle(a1, a0)
        };
        if (extent * radius).abs() >= ACCURACY {
            return Some(CircleArc::from_parts(*vertex, radius, a0, extent).into());
        }
    }
    Segment::new(*from, *to).ok().map(Element::from)
}

/// Builds the cap around the curve end `tip`, going counter-clockwise from
/// `from` (right offset end) to `to` (left offset end). `outward` is the
/// unit direction pointing away from the curve.
#[must_use]
pub fn cap(
    tip: &Point2,
    from: &Point2,
    to: &Point2,
    outward: &Vector2,
    style: CapStyle,
) -> Vec<Element> {
    let radius = (from - tip).norm();
    match style {
        CapStyle::Round => {
            let a0 = vector_angle(&(from - tip));
            vec![CircleArc::from_parts(*tip, radius, a0, PI).into()]
        }
        CapStyle::Square => {
            let ahead = outward * radius;
            let corners = [*from, from + ahead, to + ahead, *to];
            corners
                .windows(2)
                .filter_map(|w| Segment::new(w[0], w[1]).ok().map(Element::from))
                .collect()
        }
    }
}
