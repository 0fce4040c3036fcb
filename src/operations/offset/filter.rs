use tracing::trace;

use crate::geometry::curve::ContinuousCurve;
use crate::math::ACCURACY;

/// Returns `true` if `piece` belongs on a buffer boundary at `distance`
/// from `sources`: it crosses none of them, and none of its singular points
/// or element midpoints lies closer than `distance`.
#[must_use]
pub fn keeps(piece: &ContinuousCurve, sources: &[&ContinuousCurve], distance: f64) -> bool {
    if sources
        .iter()
        .any(|s| !piece.intersections(s).is_empty())
    {
        trace!("piece crosses its source");
        return false;
    }
    let nearest = piece
        .sample_points()
        .iter()
        .flat_map(|p| sources.iter().map(move |s| s.distance(p)))
        .fold(f64::INFINITY, f64::min);
    if nearest < distance - ACCURACY {
        trace!(nearest, distance, "piece too close to its source");
        return false;
    }
    true
}
