use tracing::trace;

use crate::error::{GeometryError, Result};
use crate::geometry::contour::Contour;
use crate::geometry::curve::ContinuousCurve;
use crate::geometry::element::Element;
use crate::geometry::traits::{Offsettable, Parametrized};
use crate::math::ACCURACY;

use super::join::join;

/// Builds the parallel of a continuous curve at a signed distance.
///
/// Every element is offset (positive distance = right side) and
/// consecutive offsets are joined around the source junction: an arc of
/// radius `|distance|` on convex corners, a straight segment on concave
/// ones. The result may cross itself; it is closed iff the source is.
#[derive(Debug)]
pub struct ParallelCurve2D {
    curve: ContinuousCurve,
    distance: f64,
}

impl ParallelCurve2D {
    /// Creates a new parallel curve operation.
    #[must_use]
    pub fn new(curve: ContinuousCurve, distance: f64) -> Self {
        Self { curve, distance }
    }

    /// Parallel of a contour; rings stay rings and unbounded contours stay
    /// unbounded.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn ring(contour: &Contour, distance: f64) -> Result<Contour> {
        let curve = Self::new(contour.curve().clone(), distance).execute()?;
        Ok(Contour::from_curve_unchecked(curve))
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the curve has a zero-length
    /// element or if every element vanishes at this distance.
    pub fn execute(&self) -> Result<ContinuousCurve> {
        build(&self.curve, self.distance)?.ok_or_else(|| {
            GeometryError::Degenerate(format!(
                "parallel curve vanishes at distance {}",
                self.distance
            ))
            .into()
        })
    }
}

/// Builds the parallel of `curve`, or `None` if every element vanishes.
pub(super) fn build(curve: &ContinuousCurve, distance: f64) -> Result<Option<ContinuousCurve>> {
    let source = curve.elements();
    if let Some(index) = source.iter().position(Element::is_degenerate) {
        let reason = format!("zero-length element at index {index}");
        return Err(GeometryError::Degenerate(reason).into());
    }
    if distance.abs() < ACCURACY {
        return Ok(Some(curve.clone()));
    }

    let offsets: Vec<(usize, Element)> = source
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.parallel(distance).map(|o| (i, o)))
        .collect();
    if offsets.len() < source.len() {
        trace!(
            vanished = source.len() - offsets.len(),
            distance,
            "offset elements vanished"
        );
    }
    let Some((first_index, first)) = offsets.first() else {
        return Ok(None);
    };

    let mut elements: Vec<Element> = Vec::with_capacity(offsets.len() * 2);
    elements.push(first.clone());
    for pair in offsets.windows(2) {
        let (prev_index, prev) = &pair[0];
        let (next_index, next) = &pair[1];
        push_join(&mut elements, source, *prev_index, prev, *next_index, next, distance);
        elements.push(next.clone());
    }
    if curve.is_closed() {
        if let Some((last_index, last)) = offsets.last() {
            push_join(&mut elements, source, *last_index, last, *first_index, first, distance);
        }
    }
    Ok(Some(ContinuousCurve::from_chain(elements)))
}

fn push_join(
    elements: &mut Vec<Element>,
    source: &[Element],
    prev_index: usize,
    prev: &Element,
    next_index: usize,
    next: &Element,
    distance: f64,
) {
    let (Some(vertex), Some(from), Some(to)) = (
        source[next_index].first_point(),
        prev.last_point(),
        next.first_point(),
    ) else {
        return;
    };
    let end_dir = source[prev_index].end_tangent();
    let start_dir = source[next_index].start_tangent();
    if let Some(j) = join(&vertex, &from, &to, &end_dir, &start_dir, distance) {
        elements.push(j);
    }
}
