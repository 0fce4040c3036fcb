use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::contour::Contour;
use crate::geometry::curve::ContinuousCurve;
use crate::geometry::domain::Domain;
use crate::geometry::element::Element;
use crate::geometry::traits::Parametrized;
use crate::math::{Point2, Vector2, ACCURACY};
use crate::operations::split::{ContourCrossingSplit, SelfIntersectionSplit};

use super::filter;
use super::join::{cap, CapStyle};
use super::parallel::build;

/// Options for [`Buffer2D`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferOptions {
    /// Cap drawn around the finite ends of open curves.
    pub cap: CapStyle,
}

/// Computes the region within `|distance|` of a set of curves, as a
/// [`Domain`] whose boundary contours do not cross.
///
/// Each source is first split at its self-crossings. Closed pieces give an
/// outer and an inner ring; open pieces give one contour made of both
/// parallels and the end caps. Candidates are split again, pieces that
/// come too close to their source are dropped, and the survivors are
/// re-threaded at their mutual crossings.
#[derive(Debug)]
pub struct Buffer2D {
    sources: Vec<ContinuousCurve>,
    distance: f64,
    options: BufferOptions,
}

impl Buffer2D {
    /// Creates a new buffer operation.
    #[must_use]
    pub fn new(sources: Vec<ContinuousCurve>, distance: f64, options: BufferOptions) -> Self {
        Self {
            sources,
            distance,
            options,
        }
    }

    /// Executes the buffer.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a zero distance,
    /// `GeometryError::Degenerate` for a zero-length source element, and
    /// `OperationError::UnresolvedCrossing` if crossings cannot be threaded.
    pub fn execute(&self) -> Result<Domain> {
        let d = self.distance.abs();
        if d < ACCURACY {
            return Err(OperationError::InvalidInput(
                "buffer distance must be non-zero".to_owned(),
            )
            .into());
        }

        let mut candidates = Vec::new();
        for source in &self.sources {
            for piece in SelfIntersectionSplit::new(source.clone()).execute()? {
                for contour in self.piece_contours(&piece, d)? {
                    for simple in SelfIntersectionSplit::new(contour).execute()? {
                        if filter::keeps(&simple, &[&piece], d) {
                            candidates.push(Contour::from_curve_unchecked(simple));
                        }
                    }
                }
            }
        }
        debug!(
            sources = self.sources.len(),
            candidates = candidates.len(),
            distance = d,
            "buffer candidates filtered"
        );

        let sources: Vec<&ContinuousCurve> = self.sources.iter().collect();
        let boundary: Vec<Contour> = ContourCrossingSplit::new(candidates)
            .execute()?
            .into_iter()
            .filter(|c| filter::keeps(c.curve(), &sources, d))
            .collect();
        debug!(contours = boundary.len(), "buffer boundary assembled");
        Ok(Domain::new(boundary))
    }

    /// Candidate contours around one simple piece of a source curve.
    fn piece_contours(&self, piece: &ContinuousCurve, d: f64) -> Result<Vec<ContinuousCurve>> {
        let right = build(piece, d)?;
        let left = build(piece, -d)?.map(|c| c.reversed());

        if piece.is_closed() {
            return Ok(right.into_iter().chain(left).collect());
        }

        let (Some(right), Some(left)) = (right, left) else {
            return Err(OperationError::InvalidInput(
                "open curve has no parallel at the buffer distance".to_owned(),
            )
            .into());
        };
        let (Some(first), Some(last)) = (piece.elements().first(), piece.elements().last()) else {
            return Ok(Vec::new());
        };
        let backward = -first.start_tangent();
        let forward = last.end_tangent();
        let elements = match (piece.first_point(), piece.last_point()) {
            (None, None) => return Ok(vec![right, left]),
            (Some(start), None) => {
                let mut elements = left.into_elements();
                let to = right.first_point();
                self.push_cap(&mut elements, &start, &backward, to)?;
                elements.extend(right.into_elements());
                elements
            }
            (None, Some(end)) => {
                let mut elements = right.into_elements();
                self.push_cap(&mut elements, &end, &forward, left.first_point())?;
                elements.extend(left.into_elements());
                elements
            }
            (Some(start), Some(end)) => {
                let to = right.first_point();
                let mut elements = right.into_elements();
                self.push_cap(&mut elements, &end, &forward, left.first_point())?;
                elements.extend(left.into_elements());
                self.push_cap(&mut elements, &start, &backward, to)?;
                elements
            }
        };
        Ok(vec![ContinuousCurve::from_chain(elements)])
    }

    /// Appends a cap around `tip` from the current chain end to `to`.
    fn push_cap(
        &self,
        elements: &mut Vec<Element>,
        tip: &Point2,
        outward: &Vector2,
        to: Option<Point2>,
    ) -> Result<()> {
        let from = elements.last().and_then(Parametrized::last_point);
        let (Some(from), Some(to)) = (from, to) else {
            return Err(OperationError::InvalidInput("cap at an unbounded end".to_owned()).into());
        };
        elements.extend(cap(tip, &from, &to, outward, self.options.cap));
        Ok(())
    }
}
