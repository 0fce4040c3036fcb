use tracing::{debug, trace};

use crate::error::{CirculisError, OperationError, Result};
use crate::geometry::curve::ContinuousCurve;
use crate::geometry::element::Element;
use crate::geometry::traits::Parametrized;
use crate::math::{coincident, Point2};

use super::contact::{contact_step, is_crossing};
use super::twin::{Position, TwinMap};

/// A self-crossing of a curve, with the composite position of the point on
/// each of the two elements involved.
#[derive(Debug, Clone, Copy)]
pub struct SelfCrossing {
    pub point: Point2,
    pub first: f64,
    pub second: f64,
}

/// Splits a continuous curve at its self-crossings into simple pieces.
///
/// The first piece starts at the curve start and hops across every
/// crossing it meets until it reaches the curve end; each remaining piece
/// is a closed loop. A simple curve comes back unchanged.
#[derive(Debug)]
pub struct SelfIntersectionSplit {
    curve: ContinuousCurve,
}

impl SelfIntersectionSplit {
    /// Creates a new self-intersection split operation.
    #[must_use]
    pub fn new(curve: ContinuousCurve) -> Self {
        Self { curve }
    }

    /// Executes the split.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::UnresolvedCrossing` if the crossings cannot
    /// be threaded into pieces.
    pub fn execute(&self) -> Result<Vec<ContinuousCurve>> {
        let crossings = find_crossings(&self.curve);
        if crossings.is_empty() {
            return Ok(vec![self.curve.clone()]);
        }
        debug!(
            elements = self.curve.element_count(),
            crossings = crossings.len(),
            "splitting self-intersecting curve"
        );

        let mut twins = TwinMap::new();
        for c in &crossings {
            twins.insert_pair(Position(c.first), Position(c.second))?;
        }

        let pieces = thread(&self.curve, twins)?;
        debug!(pieces = pieces.len(), "self-intersection split done");
        Ok(pieces)
    }
}

/// Walks `curve` through the twin map: the first piece starts at the curve
/// start, every piece after it is a loop closed over the remaining twins.
fn thread(curve: &ContinuousCurve, mut twins: TwinMap<Position>) -> Result<Vec<ContinuousCurve>> {
    let mut pieces = Vec::with_capacity(twins.len() / 2 + 1);

    // Piece through the curve start.
    let mut elements = Vec::new();
    let mut position = Position(curve.t0());
    while let Some(next) = twins.next_after(&position) {
        curve.append_range(position.0, next.0, &mut elements);
        position = twins.take(&next)?;
    }
    curve.append_range(position.0, curve.t1(), &mut elements);
    push_piece(&mut pieces, elements);

    // Loops.
    while let Some(start) = twins.first_key() {
        let mut elements = Vec::new();
        let mut position = twins.twin(&start).ok_or_else(|| lost(start.0))?;
        loop {
            let next = twins.next_after(&position).ok_or_else(|| lost(position.0))?;
            curve.append_range(position.0, next.0, &mut elements);
            let twin = twins.take(&next)?;
            if next == start {
                break;
            }
            position = twin;
        }
        push_piece(&mut pieces, elements);
    }
    Ok(pieces)
}

fn lost(position: f64) -> CirculisError {
    OperationError::UnresolvedCrossing(format!("no crossing ahead of position {position}")).into()
}

fn push_piece(pieces: &mut Vec<ContinuousCurve>, elements: Vec<Element>) {
    if elements.is_empty() {
        trace!("dropping empty piece");
        return;
    }
    pieces.push(ContinuousCurve::from_chain(elements));
}

/// Finds every crossing between two elements of `curve`.
///
/// Points at the junction of consecutive elements (including the closing
/// junction of a closed curve) and tangent touches are not crossings. A
/// crossing through a junction is seen from both elements of that junction
/// and recorded once.
#[must_use]
pub fn find_crossings(curve: &ContinuousCurve) -> Vec<SelfCrossing> {
    let elements = curve.elements();
    let n = elements.len();
    let mut crossings: Vec<SelfCrossing> = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (&elements[i], &elements[j]);
            for point in a.intersections(b) {
                let consecutive = j == i + 1
                    && a.last_point().is_some_and(|p| coincident(&p, &point));
                let closing = curve.is_closed()
                    && i == 0
                    && j == n - 1
                    && a.first_point().is_some_and(|p| coincident(&p, &point));
                if consecutive || closing {
                    continue;
                }
                if crossings.iter().any(|c| coincident(&c.point, &point)) {
                    continue;
                }
                let first = curve.global_position(i, a.position(&point));
                let second = curve.global_position(j, b.position(&point));
                if !is_crossing(curve, first, curve, second, &point, contact_step(a, b)) {
                    trace!(i, j, first, second, "tangent contact skipped");
                    continue;
                }
                trace!(i, j, first, second, "self crossing");
                crossings.push(SelfCrossing {
                    point,
                    first,
                    second,
                });
            }
        }
    }
    crossings
}
