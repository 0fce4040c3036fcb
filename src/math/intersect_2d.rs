use super::{cross, Point2, Vector2, ACCURACY};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() < ACCURACY * d1.norm() * d2.norm() {
        return None;
    }
    let delta = p2 - p1;
    let t = cross(&delta, d2) / denom;
    let u = cross(&delta, d1) / denom;
    Some((t, u))
}

/// Intersection of the line `origin + t * dir` with a full circle.
///
/// Returns the line parameters of the intersection points, in increasing
/// order. A line at distance `radius` (within [`ACCURACY`]) from the
/// center touches the circle at a single point.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    center: &Point2,
    radius: f64,
) -> Vec<f64> {
    let len = dir.norm();
    if len < ACCURACY || radius < ACCURACY {
        return Vec::new();
    }
    let unit = dir / len;
    let to_center = center - origin;

    // Foot of the perpendicular from the center, and signed distance to the line.
    let foot = to_center.dot(&unit);
    let h = cross(&unit, &to_center).abs();

    if h > radius + ACCURACY {
        return Vec::new();
    }
    if (h - radius).abs() <= ACCURACY {
        return vec![foot / len];
    }
    let half_chord = (radius * radius - h * h).max(0.0).sqrt();
    vec![(foot - half_chord) / len, (foot + half_chord) / len]
}

/// Intersection of two full circles.
///
/// Concentric circles yield no points, even when they coincide. Tangent
/// circles (within [`ACCURACY`]) yield a single point.
#[must_use]
pub fn circle_circle_intersect_2d(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    if r1 < ACCURACY || r2 < ACCURACY {
        return Vec::new();
    }
    let delta = c2 - c1;
    let dist = delta.norm();
    if dist < ACCURACY {
        return Vec::new();
    }
    let axis = delta / dist;

    // Tangent cases first: the radical-line height is ill-conditioned there.
    if (dist - (r1 + r2)).abs() <= ACCURACY {
        return vec![c1 + axis * r1];
    }
    if (dist - (r1 - r2).abs()).abs() <= ACCURACY {
        let sign = if r1 >= r2 { 1.0 } else { -1.0 };
        return vec![c1 + axis * (sign * r1)];
    }
    if dist > r1 + r2 || dist < (r1 - r2).abs() {
        return Vec::new();
    }

    // Distance from c1 along the center line to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist * dist) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let mid = c1 + axis * a;
    let perp = Vector2::new(-axis.y, axis.x);
    vec![mid + perp * h, mid - perp * h]
}
