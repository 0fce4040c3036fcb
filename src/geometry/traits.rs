use std::f64::consts::TAU;

use crate::math::arc_2d::ccw_angle;
use crate::math::{Point2, ACCURACY};

use super::contour::Contour;

/// Shapes with a parameter range that can be evaluated and projected onto.
pub trait Parametrized {
    /// Start of the parameter range (may be `-∞` for elements).
    fn t0(&self) -> f64;

    /// End of the parameter range (may be `+∞` for elements).
    fn t1(&self) -> f64;

    /// Evaluates the point at parameter `t`.
    fn point(&self, t: f64) -> Point2;

    /// Parameter of the point of the shape closest to `point`.
    fn position(&self, point: &Point2) -> f64;

    /// Arc length; `+∞` for unbounded shapes.
    fn length(&self) -> f64;

    /// First point, `None` if the shape is unbounded at its start.
    fn first_point(&self) -> Option<Point2>;

    /// Last point, `None` if the shape is unbounded at its end.
    fn last_point(&self) -> Option<Point2>;

    /// Returns `true` if both ends are finite.
    fn is_bounded(&self) -> bool {
        self.first_point().is_some() && self.last_point().is_some()
    }
}

/// Shapes that can build their parallel at a signed distance.
///
/// Positive distances offset to the right of the direction of travel.
pub trait Offsettable {
    type Output;

    fn parallel(&self, distance: f64) -> Self::Output;
}

/// Shapes made of (or acting as) domain boundary contours.
pub trait Boundary {
    /// The contours of the boundary.
    fn contours(&self) -> &[Contour];

    /// Winding number of the whole boundary around `point`.
    ///
    /// Unbounded contours are closed at infinity together: the end of each
    /// one is joined counter-clockwise to the nearest contour start.
    fn winding_number(&self, point: &Point2) -> i32 {
        let contours = self.contours();
        let along: f64 = contours
            .iter()
            .map(|c| c.curve().travel_angle(point))
            .sum();
        let ends: Vec<(f64, f64)> = contours
            .iter()
            .filter_map(|c| c.curve().angles_at_infinity())
            .collect();
        let closing: f64 = ends
            .iter()
            .map(|&(_, to)| {
                ends.iter()
                    .map(|&(from, _)| {
                        let a = ccw_angle(to, from);
                        if a > TAU - ACCURACY {
                            0.0
                        } else {
                            a
                        }
                    })
                    .fold(f64::INFINITY, f64::min)
            })
            .sum();
        #[allow(clippy::cast_possible_truncation)]
        let turns = ((along + closing) / TAU).round() as i32;
        turns
    }

    /// Returns `true` if every contour is a bounded ring.
    fn is_bounded(&self) -> bool {
        self.contours().iter().all(Contour::is_ring)
    }
}
