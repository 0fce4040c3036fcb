use tracing::{debug, trace};

use crate::error::{CirculisError, OperationError, Result};
use crate::geometry::contour::Contour;
use crate::geometry::curve::ContinuousCurve;
use crate::geometry::element::Element;
use crate::geometry::traits::Parametrized;
use crate::math::{coincident, Point2};

use super::contact::{contact_step, is_crossing};
use super::twin::{Position, TwinMap};

/// Crossing position key: contour index, then composite position on it.
type Key = (usize, Position);

/// Re-threads simple contours that cross each other into simple contours
/// that no longer cross.
///
/// Every crossing is resolved by switching from one contour to the other,
/// always keeping the region on the left. Contours without crossings are
/// returned as they are.
#[derive(Debug)]
pub struct ContourCrossingSplit {
    contours: Vec<Contour>,
}

impl ContourCrossingSplit {
    /// Creates a new contour crossing split operation.
    #[must_use]
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    /// Two-contour form: returns both contours unchanged when they do not
    /// cross.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::UnresolvedCrossing` if the crossings cannot
    /// be threaded.
    pub fn pair(a: &Contour, b: &Contour) -> Result<Vec<Contour>> {
        if a.curve().intersections(b.curve()).is_empty() {
            return Ok(vec![a.clone(), b.clone()]);
        }
        Self::new(vec![a.clone(), b.clone()]).execute()
    }

    /// Executes the split over all contours.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::UnresolvedCrossing` if the crossings cannot
    /// be threaded.
    pub fn execute(&self) -> Result<Vec<Contour>> {
        let mut twins = TwinMap::new();
        for (a, b) in find_crossings(&self.contours) {
            twins.insert_pair(a, b)?;
        }
        if twins.is_empty() {
            return Ok(self.contours.clone());
        }
        debug!(
            contours = self.contours.len(),
            crossings = twins.len() / 2,
            "re-threading crossing contours"
        );

        let result = self.thread(twins)?;
        debug!(contours = result.len(), "re-threading done");
        Ok(result)
    }

    /// Walks the contours through the twin map. Uncrossed contours are kept,
    /// each crossed unbounded contour yields one walk from infinity, and the
    /// positions left over close into rings.
    fn thread(&self, mut twins: TwinMap<Key>) -> Result<Vec<Contour>> {
        let crossed: Vec<bool> = (0..self.contours.len())
            .map(|c| {
                twins
                    .first_from(&(c, Position(f64::NEG_INFINITY)))
                    .is_some_and(|k| k.0 == c)
            })
            .collect();

        let mut result = Vec::with_capacity(self.contours.len() + twins.len() / 2);

        // Contours without crossings.
        for (c, contour) in self.contours.iter().enumerate() {
            if !crossed[c] {
                result.push(contour.clone());
            }
        }

        // Walks starting at infinity on crossed unbounded contours.
        for (c, contour) in self.contours.iter().enumerate() {
            if !crossed[c] || contour.is_ring() {
                continue;
            }
            let mut elements = Vec::new();
            let mut position: Key = (c, Position(contour.curve().t0()));
            while let Some(next) = self.next_key(&twins, &position, &mut elements)? {
                position = twins.take(&next)?;
            }
            trace!(contour = c, elements = elements.len(), "unbounded contour re-threaded");
            result.push(Contour::from_curve_unchecked(
                ContinuousCurve::from_chain(elements),
            ));
        }

        // Closed rings from the remaining positions.
        while let Some(start) = twins.first_key() {
            let mut elements = Vec::new();
            let mut position = twins.twin(&start).ok_or_else(|| lost(&start))?;
            loop {
                let next = self
                    .next_key(&twins, &position, &mut elements)?
                    .ok_or_else(|| lost(&position))?;
                let twin = twins.take(&next)?;
                if next == start {
                    break;
                }
                position = twin;
            }
            if !elements.is_empty() {
                result.push(Contour::from_curve_unchecked(
                    ContinuousCurve::from_chain(elements),
                ));
            }
        }

        Ok(result)
    }

    /// Appends the path from `position` to the next crossing along the same
    /// contour and returns that crossing.
    ///
    /// Rings wrap around their closing point. On an unbounded contour the
    /// path runs to infinity when no crossing lies ahead, and `None` is
    /// returned.
    fn next_key(
        &self,
        twins: &TwinMap<Key>,
        position: &Key,
        elements: &mut Vec<Element>,
    ) -> Result<Option<Key>> {
        let (c, from) = *position;
        let curve = self.contours[c].curve();
        if let Some(next) = twins.next_after(position).filter(|k| k.0 == c) {
            curve.append_range(from.0, next.1 .0, elements);
            return Ok(Some(next));
        }
        curve.append_range(from.0, curve.t1(), elements);
        if !curve.is_closed() {
            return Ok(None);
        }
        let next = twins
            .first_from(&(c, Position(f64::NEG_INFINITY)))
            .filter(|k| k.0 == c)
            .ok_or_else(|| lost(position))?;
        curve.append_range(curve.t0(), next.1 .0, elements);
        Ok(Some(next))
    }
}

fn lost(key: &Key) -> CirculisError {
    OperationError::UnresolvedCrossing(format!(
        "no crossing ahead of position {} on contour {}",
        key.1 .0, key.0
    ))
    .into()
}

/// Finds every crossing between two different contours, as pairs of keys.
///
/// A crossing through the junction of two elements is seen from both
/// elements and recorded once. Contours that only touch do not cross.
fn find_crossings(contours: &[Contour]) -> Vec<(Key, Key)> {
    let mut pairs = Vec::new();
    for (ci, a) in contours.iter().enumerate() {
        for (cj, b) in contours.iter().enumerate().skip(ci + 1) {
            let (ca, cb) = (a.curve(), b.curve());
            let mut seen: Vec<Point2> = Vec::new();
            for (ei, ea) in ca.elements().iter().enumerate() {
                for (ej, eb) in cb.elements().iter().enumerate() {
                    for point in ea.intersections(eb) {
                        if seen.iter().any(|q| coincident(q, &point)) {
                            continue;
                        }
                        seen.push(point);
                        let pa = ca.global_position(ei, ea.position(&point));
                        let pb = cb.global_position(ej, eb.position(&point));
                        if !is_crossing(ca, pa, cb, pb, &point, contact_step(ea, eb)) {
                            trace!(ci, cj, pa, pb, "tangent contact skipped");
                            continue;
                        }
                        trace!(ci, cj, pa, pb, "contour crossing");
                        pairs.push(((ci, Position(pa)), (cj, Position(pb))));
                    }
                }
            }
        }
    }
    pairs
}
