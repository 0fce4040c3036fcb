use super::arc_2d::{circle_point, sweep_offset};
use super::{Point2, Vector2};

/// Returns the minimum distance from `p` to the straight element
/// `origin + t * dir`, `t ∈ [t0, t1]`. Either bound may be infinite.
#[must_use]
pub fn point_to_line_dist(p: &Point2, origin: &Point2, dir: &Vector2, t0: f64, t1: f64) -> f64 {
    let len_sq = dir.norm_squared();
    if len_sq < 1e-20 {
        // Degenerate element (zero length).
        return (p - origin).norm();
    }

    // Project onto the infinite line, clamp to the parameter range.
    let t = ((p - origin).dot(dir) / len_sq).clamp(t0, t1);
    (p - (origin + dir * t)).norm()
}

/// Returns the minimum distance from `p` to a circular arc.
///
/// If the point's angle (relative to center) falls within the arc range,
/// the distance is `||p - center| - radius|`. Otherwise it is the distance
/// to the nearer arc endpoint.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let offset = p - center;
    let dist_to_center = offset.norm();

    let angle = offset.y.atan2(offset.x);
    if sweep_offset(angle, start_angle, sweep, 1e-12).is_some() {
        return (dist_to_center - radius).abs();
    }

    let e0 = circle_point(center, radius, start_angle);
    let e1 = circle_point(center, radius, start_angle + sweep);
    (p - e0).norm().min((p - e1).norm())
}
