//! 2D arc/bulge math utilities.
//!
//! Bulge convention: `bulge = tan(sweep_angle / 4)`.
//! - `bulge = 0`: straight line
//! - `bulge > 0`: counter-clockwise arc
//! - `bulge < 0`: clockwise arc
//! - `|bulge| = 1`: semicircle
use std::f64::consts::TAU;

use super::{Point2, Vector2};

/// Center, radius, start angle and signed sweep of a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns `None` for zero-length chords or a zero bulge.
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Option<ArcGeometry> {
    let chord = p1 - p0;
    let chord_len = chord.norm();
    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return None;
    }

    // Distance from chord midpoint to center, along the left normal.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = Point2::new((p0.x + p1.x) * 0.5, (p0.y + p1.y) * 0.5);
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);

    Some(ArcGeometry {
        center,
        radius,
        start_angle,
        sweep: 4.0 * bulge.atan(),
    })
}

/// Bulge value of an arc with the given signed sweep.
#[must_use]
pub fn bulge_from_sweep(sweep: f64) -> f64 {
    (sweep / 4.0).tan()
}

/// Evaluates the point at `angle` on the circle `(center, radius)`.
#[must_use]
pub fn circle_point(center: &Point2, radius: f64, angle: f64) -> Point2 {
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Normalizes an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Angle of a vector, in `[0, 2π)`.
#[must_use]
pub fn vector_angle(v: &Vector2) -> f64 {
    normalize_angle(v.y.atan2(v.x))
}

/// Signed angle turning `from` onto `to`, in `(-π, π]`.
#[must_use]
pub fn signed_angle(from: &Vector2, to: &Vector2) -> f64 {
    let c = from.x * to.y - from.y * to.x;
    let d = from.dot(to);
    c.atan2(d)
}

/// Angular travel from `start_angle` to `angle` in the direction of `sweep`,
/// if that travel lies within `[-eps, |sweep| + eps]`.
///
/// The result is clamped into `[0, |sweep|]`.
#[must_use]
pub fn sweep_offset(angle: f64, start_angle: f64, sweep: f64, eps: f64) -> Option<f64> {
    let travel = if sweep >= 0.0 {
        normalize_angle(angle - start_angle)
    } else {
        normalize_angle(start_angle - angle)
    };
    let extent = sweep.abs();
    if travel <= extent + eps {
        return Some(travel.min(extent));
    }
    // Just below the start angle wraps to almost 2π.
    if TAU - travel <= eps {
        return Some(0.0);
    }
    None
}

/// Counter-clockwise angle from `from` to `to`, in `[0, 2π)`.
#[must_use]
pub fn ccw_angle(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn semicircle_ccw() {
        // CCW semicircle from (0,0) to (2,0), bulge=1: center (1,0), sweep +π,
        // passing through the bottom.
        let arc = arc_from_bulge(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0), 1.0).unwrap();
        assert!((arc.center.x - 1.0).abs() < TOL, "cx={}", arc.center.x);
        assert!(arc.center.y.abs() < TOL, "cy={}", arc.center.y);
        assert!((arc.radius - 1.0).abs() < TOL, "r={}", arc.radius);
        assert!((arc.sweep - PI).abs() < TOL, "sweep={}", arc.sweep);

        let mid = circle_point(&arc.center, arc.radius, arc.start_angle + arc.sweep * 0.5);
        assert!((mid.x - 1.0).abs() < TOL, "mid.x={}", mid.x);
        assert!((mid.y + 1.0).abs() < TOL, "mid.y={}", mid.y);
    }

    #[test]
    fn semicircle_cw_goes_through_top() {
        let arc = arc_from_bulge(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0), -1.0).unwrap();
        assert!((arc.sweep + PI).abs() < TOL, "sweep={}", arc.sweep);
        let mid = circle_point(&arc.center, arc.radius, arc.start_angle + arc.sweep * 0.5);
        assert!((mid.y - 1.0).abs() < TOL, "mid.y={}", mid.y);
    }

    #[test]
    fn quarter_circle_ccw() {
        let bulge = (PI / 8.0).tan();
        let arc = arc_from_bulge(&Point2::new(1.0, 0.0), &Point2::new(0.0, 1.0), bulge).unwrap();
        assert!((arc.radius - 1.0).abs() < 1e-9, "r={}", arc.radius);
        assert!(arc.center.coords.norm() < 1e-9);
        assert!((arc.sweep - PI / 2.0).abs() < 1e-9);
        assert!((bulge_from_sweep(arc.sweep) - bulge).abs() < 1e-12);
    }

    #[test]
    fn zero_chord_has_no_arc() {
        let p = Point2::new(3.0, 3.0);
        assert!(arc_from_bulge(&p, &p, 0.5).is_none());
    }

    #[test]
    fn sweep_offset_ccw_and_cw() {
        // CCW arc from 0 to π/2.
        let t = sweep_offset(PI / 4.0, 0.0, PI / 2.0, 1e-12).unwrap();
        assert!((t - PI / 4.0).abs() < TOL);
        assert!(sweep_offset(PI, 0.0, PI / 2.0, 1e-12).is_none());

        // CW arc from 0 to -π/2 contains -π/4 (= 7π/4).
        let t = sweep_offset(-PI / 4.0, 0.0, -PI / 2.0, 1e-12).unwrap();
        assert!((t - PI / 4.0).abs() < TOL);
        assert!(sweep_offset(PI / 4.0, 0.0, -PI / 2.0, 1e-12).is_none());
    }

    #[test]
    fn sweep_offset_tolerates_start_wrap() {
        let t = sweep_offset(-1e-13, 0.0, PI / 2.0, 1e-10).unwrap();
        assert!(t.abs() < TOL);
    }

    #[test]
    fn signed_angle_turns() {
        let east = Vector2::new(1.0, 0.0);
        let north = Vector2::new(0.0, 1.0);
        assert!((signed_angle(&east, &north) - PI / 2.0).abs() < TOL);
        assert!((signed_angle(&north, &east) + PI / 2.0).abs() < TOL);
    }

    #[test]
    fn normalize_negative_angle() {
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < TOL);
        assert!(normalize_angle(TAU).abs() < TOL);
    }
}
